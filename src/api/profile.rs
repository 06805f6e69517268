use super::{Access, Api};
use crate::libs::error::ApiError;
use crate::libs::session::User;
use reqwest::Method;
use serde::Serialize;

const PROFILE_URL: &str = "auth/profile/";

/// Profile changes. A password change needs both the current and the new password.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.new_password.is_some() && self.current_password.as_deref().unwrap_or("").is_empty() {
            return Err(ApiError::Validation(
                "The current password is required to set a new one".to_string(),
            ));
        }
        Ok(())
    }
}

impl Api {
    pub async fn profile(&self) -> Result<User, ApiError> {
        let builder = self.request(Method::GET, PROFILE_URL, Access::Authenticated);
        self.fetch(builder, Access::Authenticated).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        update.validate()?;
        let builder = self.request(Method::PATCH, PROFILE_URL, Access::Authenticated).json(update);
        self.fetch(builder, Access::Authenticated).await
    }
}
