//! User Service - accounts, registration and login

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::credentials::{CredentialService, hash_password, verify_password};
use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, LoginInput, RegisterInput, User, UserChanges, UserInput};
use crate::repository::UserRepository;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    credentials: CredentialService,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, credentials: CredentialService) -> Self {
        Self {
            repository: Arc::new(repository),
            credentials,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: ObjectId) -> UserResult<User> {
        self.repository.get_by_id(id).await?.ok_or(UserError::NotFound)
    }

    #[instrument(skip(self, input), fields(role = %input.role))]
    pub async fn create_user(&self, input: UserInput) -> UserResult<User> {
        if self.repository.find_by_email(&input.email).await?.is_some() {
            return Err(UserError::EmailTaken);
        }

        let changes = into_changes(input)?;
        self.repository.create(User::new(changes)).await
    }

    /// Keeping its own email is not a conflict. The password is re-hashed.
    #[instrument(skip(self, input), fields(role = %input.role))]
    pub async fn update_user(&self, id: ObjectId, input: UserInput) -> UserResult<User> {
        self.get_user(id).await?;

        if let Some(other) = self.repository.find_by_email(&input.email).await? {
            if other.id != id {
                return Err(UserError::EmailTaken);
            }
        }

        let changes = into_changes(input)?;
        self.repository
            .update(id, changes)
            .await?
            .ok_or(UserError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: ObjectId) -> UserResult<User> {
        self.repository.delete(id).await?.ok_or(UserError::NotFound)
    }

    /// Creates a CUSTOMER account and signs a token for it.
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterInput) -> UserResult<AuthResponse> {
        let user = self.create_user(UserInput::from(input)).await?;
        tracing::info!(user_id = %user.id, "User registered");
        self.credentials.issue(&user)
    }

    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginInput) -> UserResult<AuthResponse> {
        let Some(user) = self.repository.find_by_email(&input.email).await? else {
            return Err(UserError::InvalidCredentials);
        };

        if !verify_password(&input.password, &user.password_hash) {
            tracing::info!(user_id = %user.id, "Login rejected");
            return Err(UserError::InvalidCredentials);
        }

        self.credentials.issue(&user)
    }
}

fn into_changes(input: UserInput) -> UserResult<UserChanges> {
    Ok(UserChanges {
        password_hash: hash_password(&input.password)?,
        email: input.email,
        role: input.role,
        profile: input.profile,
    })
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            credentials: self.credentials.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use axum_helpers::{JwtAuth, JwtConfig, Role};
    use mockall::predicate::eq;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("user-service-test-secret-32-chars!!").unwrap())
    }

    fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
        UserService::new(repo, CredentialService::new(auth()))
    }

    fn stored(email: &str, password: &str, role: Role) -> User {
        User::new(UserChanges {
            email: email.into(),
            password_hash: hash_password(password).unwrap(),
            role,
            profile: None,
        })
    }

    fn register_input() -> RegisterInput {
        RegisterInput {
            email: "jane@store.io".into(),
            password: "S3cret!pass".into(),
            profile: None,
        }
    }

    #[tokio::test]
    async fn test_register_creates_customer_with_hashed_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("jane@store.io"))
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|user| {
                user.role == Role::Customer && verify_password("S3cret!pass", &user.password_hash)
            })
            .times(1)
            .returning(Ok);

        let issued = service(repo).register(register_input()).await.unwrap();

        assert_eq!(issued.role, Role::Customer);
        let claim = auth().decode(&issued.token).unwrap();
        assert_eq!(claim.sub, issued.id);
        assert_eq!(claim.role, Role::Customer);
    }

    #[tokio::test]
    async fn test_register_existing_email_conflicts() {
        let existing = stored("jane@store.io", "Other!pass1", Role::Customer);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();

        let result = service(repo).register(register_input()).await;
        assert!(matches!(result, Err(UserError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_look_alike() {
        let existing = stored("jane@store.io", "S3cret!pass", Role::Admin);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("ghost@store.io"))
            .returning(|_| Ok(None));
        repo.expect_find_by_email()
            .with(eq("jane@store.io"))
            .returning(move |_| Ok(Some(existing.clone())));
        let service = service(repo);

        let unknown = service
            .login(LoginInput { email: "ghost@store.io".into(), password: "S3cret!pass".into() })
            .await
            .unwrap_err();
        let wrong = service
            .login(LoginInput { email: "jane@store.io".into(), password: "Wrong!pass1".into() })
            .await
            .unwrap_err();

        assert!(matches!(unknown, UserError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_login_issues_token_for_stored_role() {
        let existing = stored("root@store.io", "S3cret!pass", Role::Admin);
        let id = existing.id;
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let issued = service(repo)
            .login(LoginInput { email: "root@store.io".into(), password: "S3cret!pass".into() })
            .await
            .unwrap();

        assert_eq!(issued.id, id.to_hex());
        assert_eq!(auth().decode(&issued.token).unwrap().role, Role::Admin);
    }

    #[tokio::test]
    async fn test_update_to_someone_elses_email_conflicts() {
        let other = stored("taken@store.io", "S3cret!pass", Role::Customer);
        let target = stored("jane@store.io", "S3cret!pass", Role::Customer);
        let id = target.id;
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(target.clone())));
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(other.clone())));
        repo.expect_update().never();

        let input = UserInput {
            email: "taken@store.io".into(),
            password: "S3cret!pass".into(),
            role: Role::Customer,
            profile: None,
        };
        let result = service(repo).update_user(id, input).await;
        assert!(matches!(result, Err(UserError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found_even_if_email_is_taken() {
        let other = stored("taken@store.io", "S3cret!pass", Role::Customer);
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(other.clone())));
        repo.expect_update().never();

        let input = UserInput {
            email: "taken@store.io".into(),
            password: "S3cret!pass".into(),
            role: Role::Admin,
            profile: None,
        };
        let result = service(repo).update_user(ObjectId::new(), input).await;
        assert!(matches!(result, Err(UserError::NotFound)));
    }
}
