use crate::errors::ScrapeError;
use reqwest::StatusCode;
use std::time::Duration;

/// Name of the session cookie the CMS expects.
pub const SESSION_COOKIE: &str = "smogon_session";
/// Default product identifier sent as `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = "SmogonContribScraper/1.0";

/// Client for the Smogon CMS user pages.
///
/// Performs a single authenticated GET per call. No retries.
#[derive(Clone)]
pub struct CmsClient {
    client: reqwest::Client,
    base_url: String,
    session: String,
    user_agent: String,
}

impl CmsClient {
    /// Creates a new `CmsClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Site root, e.g. `https://www.smogon.com`.
    /// * `session` - Value of the session cookie.
    /// * `user_agent` - Product identifier for the `User-Agent` header.
    /// * `timeout` - Overall request deadline, if any.
    pub fn new(
        base_url: impl Into<String>,
        session: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ScrapeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ScrapeError::Network(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: session.into(),
            user_agent: user_agent.into(),
        })
    }

    /// Site root this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the raw HTML of a user's CMS page.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Numeric forum user id.
    ///
    /// # Returns
    ///
    /// * `Result<String, ScrapeError>` - The response body.
    pub async fn fetch_user_page(&self, user_id: &str) -> Result<String, ScrapeError> {
        let url = format!("{}/cms/user/{}", self.base_url, user_id);
        tracing::info!("Fetching CMS page for user {}: {}", user_id, url);

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::COOKIE,
                format!("{}={}", SESSION_COOKIE, self.session),
            )
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("CMS request failed: {}", e);
                ScrapeError::Network(format!("CMS request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let err = status_error(status, user_id);
            tracing::error!("CMS returned {}: {}", status.as_u16(), err);
            return Err(err);
        }

        let body = response.text().await.map_err(|e| {
            ScrapeError::Network(format!("Failed to read CMS response body: {}", e))
        })?;

        tracing::info!("✓ Fetched HTML ({} characters)", body.len());
        Ok(body)
    }
}

/// Maps a non-success status to its domain failure.
pub fn status_error(status: StatusCode, user_id: &str) -> ScrapeError {
    match status {
        StatusCode::UNAUTHORIZED => ScrapeError::Authentication("unauthorized".to_string()),
        StatusCode::FORBIDDEN => ScrapeError::Authentication(
            "forbidden — session may have expired".to_string(),
        ),
        StatusCode::NOT_FOUND => ScrapeError::NotFound(format!("user {} not found", user_id)),
        other => ScrapeError::Http {
            status: other.as_u16(),
            status_text: other.canonical_reason().unwrap_or_default().to_string(),
        },
    }
}
