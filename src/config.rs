use std::env;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the deployed record API.
    pub records_api_url: String,
    pub admin_password: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let records_api_url = env::var("RECORDS_API_URL")
            .map_err(|_| AppError::BadRequest("RECORDS_API_URL is not set".to_string()))?;
        let admin_password = env::var("ADMIN_PASSWORD")
            .map_err(|_| AppError::BadRequest("ADMIN_PASSWORD is not set".to_string()))?;
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Ok(Self {
            records_api_url,
            admin_password,
            port,
        })
    }
}
