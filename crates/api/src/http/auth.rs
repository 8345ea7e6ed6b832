use assess_core::model::{AuthUser, Credentials, Signup, UserRole};

use super::HttpBackend;
use super::decode;
use super::wire;
use crate::backend::{ApiError, AuthApi};

#[async_trait::async_trait]
impl AuthApi for HttpBackend {
    async fn signup(&self, signup: &Signup) -> Result<(), ApiError> {
        let url = self.url("/api/auth/signup");
        let payload = wire::SignupRequest {
            name: signup.name(),
            email: signup.email(),
            password: signup.password(),
        };
        let response = self.client.post(url).json(&payload).send().await?;
        decode::<wire::MessageBody>(response).await?;
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<UserRole, ApiError> {
        let url = self.url("/api/auth/login");
        let payload = wire::LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response = self.client.post(url).json(&payload).send().await?;
        let body: wire::LoginResponse = decode(response).await?;
        wire::role_from_wire(&body.role)
    }

    async fn check(&self) -> Result<AuthUser, ApiError> {
        let url = self.url("/api/auth/check");
        let response = self.client.get(url).send().await?;
        let body: wire::CheckResponse = decode(response).await?;
        body.into_user()
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.url("/api/auth/logout");
        let response = self.client.post(url).send().await?;
        decode::<wire::MessageBody>(response).await?;
        Ok(())
    }
}
