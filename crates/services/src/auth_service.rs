use std::sync::Arc;

use api::AuthApi;
use assess_core::model::{AuthUser, Credentials, Signup};

use crate::error::AuthServiceError;

/// Account and session facade the views talk to.
///
/// The service is stateless: the signed-in user it returns is held by
/// the UI's explicitly injected session object, never by an ambient
/// global. The backend keeps the authoritative cookie session.
#[derive(Clone)]
pub struct AuthService {
    auth: Arc<dyn AuthApi>,
}

impl AuthService {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthApi>) -> Self {
        Self { auth }
    }

    /// Validates the form fields and signs in.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Validation` for empty fields and
    /// `AuthServiceError::Api` for bad credentials or transport failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AuthServiceError> {
        let credentials = Credentials::new(email, password)?;
        let role = self.auth.login(&credentials).await?;
        tracing::info!(%role, "signed in");
        Ok(self.auth.check().await?)
    }

    /// Registers a new candidate account.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Validation` for empty fields and
    /// `AuthServiceError::Api` when the email is taken.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthServiceError> {
        let signup = Signup::new(name, email, password)?;
        self.auth.signup(&signup).await?;
        tracing::info!("account created");
        Ok(())
    }

    /// The user attached to the current backend session, if any.
    ///
    /// A missing or broken session simply means nobody is signed in.
    pub async fn restore(&self) -> Option<AuthUser> {
        match self.auth.check().await {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::debug!(error = %err, "no session to restore");
                None
            }
        }
    }

    /// Drops the backend session.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Api` on transport failure.
    pub async fn logout(&self) -> Result<(), AuthServiceError> {
        self.auth.logout().await?;
        tracing::info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::InMemoryBackend;
    use assess_core::model::{AuthError, UserRole};

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryBackend::with_demo_data()))
    }

    #[tokio::test]
    async fn login_returns_the_signed_in_user() {
        let service = service();
        let user = service
            .login("candidate@example.com", "password")
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Candidate);
        assert_eq!(user.email, "candidate@example.com");
        assert!(service.restore().await.is_some());
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials_with_backend_message() {
        let service = service();
        let err = service
            .login("candidate@example.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn empty_email_never_reaches_the_backend() {
        let service = service();
        let err = service.login("", "password").await.unwrap_err();
        assert!(matches!(
            err,
            AuthServiceError::Validation(AuthError::EmptyEmail)
        ));
    }

    #[tokio::test]
    async fn signup_then_login_round_trips() {
        let service = service();
        service
            .signup("New Person", "new@example.com", "pw")
            .await
            .unwrap();
        let user = service.login("new@example.com", "pw").await.unwrap();
        assert_eq!(user.role, UserRole::Candidate);
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let service = service();
        service
            .login("recruiter@example.com", "password")
            .await
            .unwrap();
        service.logout().await.unwrap();
        assert!(service.restore().await.is_none());
    }
}
