//! Token and registration endpoints. Both are called without a bearer token.

use super::{Access, Api};
use crate::libs::error::ApiError;
use crate::libs::session::{LoginCredentials, RegisterData, User};
use reqwest::Method;
use serde::Deserialize;

const TOKEN_URL: &str = "accounts/token/";
const REGISTER_URL: &str = "accounts/register/";

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access: String,
    #[serde(default)]
    pub refresh: String,
    pub user: User,
}

impl Api {
    pub async fn obtain_token(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        let builder = self.request(Method::POST, TOKEN_URL, Access::Anonymous).json(credentials);
        self.fetch(builder, Access::Anonymous).await
    }

    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ApiError> {
        let builder = self.request(Method::POST, REGISTER_URL, Access::Anonymous).json(data);
        self.fetch(builder, Access::Anonymous).await
    }
}
