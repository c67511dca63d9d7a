use crate::models::{College, StudentProfile};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the data platform
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("College catalog is empty")]
    EmptyCatalog,
}

/// REST client for the Compass data platform
///
/// Handles the two upstream reads the engine depends on:
/// - Fetching the student profile for the caller
/// - Scanning the full college catalog
///
/// The API is PostgREST-style: tables are addressed under `/rest/v1/`
/// and filters are query parameters.
pub struct SupabaseClient {
    base_url: String,
    service_key: String,
    client: Client,
}

impl SupabaseClient {
    pub fn new(base_url: String, service_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            service_key,
            client,
        }
    }

    /// Fetch the student profile for a given user id
    pub async fn get_profile(&self, user_id: &str) -> Result<StudentProfile, SupabaseError> {
        let url = format!(
            "{}/rest/v1/user_profiles?id=eq.{}&limit=1",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch profile: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected a JSON array".into()))?;

        let row = rows.first().ok_or_else(|| {
            SupabaseError::NotFound(format!("Profile not found for user {}", user_id))
        })?;

        serde_json::from_value(row.clone())
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Full catalog scan, ordered by ranking ascending
    ///
    /// Rows that fail to parse are skipped rather than failing the scan.
    /// An empty catalog is an error: scoring against nothing would
    /// silently overwrite the user's recommendations with an empty set.
    pub async fn list_colleges(&self) -> Result<Vec<College>, SupabaseError> {
        let url = format!(
            "{}/rest/v1/colleges?order=ranking.asc",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch catalog: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected a JSON array".into()))?;

        let colleges: Vec<College> = rows
            .iter()
            .filter_map(|row| serde_json::from_value(row.clone()).ok())
            .collect();

        if colleges.is_empty() {
            return Err(SupabaseError::EmptyCatalog);
        }

        tracing::debug!("Fetched {} colleges from catalog", colleges.len());

        Ok(colleges)
    }
}
