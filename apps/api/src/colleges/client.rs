//! Client for the external college directory.

use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CollegeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("directory returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("college {0} not found")]
    NotFound(String),

    #[error("directory returned an unexpected body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct CollegeClient {
    http: Client,
    base_url: Url,
    /// Upper bound for one directory request.
    timeout: Duration,
}

impl CollegeClient {
    pub fn new(http: Client, base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("COLLEGE_API_URL '{base_url}' is not a valid URL"))?;
        if base_url.cannot_be_a_base() {
            bail!("COLLEGE_API_URL '{base_url}' cannot be used as a base URL");
        }
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// All colleges, optionally narrowed to one district by the directory.
    pub async fn list(&self, district: Option<&str>) -> Result<Vec<Value>, CollegeError> {
        let mut request = self.http.get(self.base_url.clone()).timeout(self.timeout);
        if let Some(district) = district {
            request = request.query(&[("district", district)]);
        }

        let response = check_status(request.send().await?, None).await?;
        let colleges: Vec<Value> = serde_json::from_str(&response.text().await?)?;
        debug!("College directory returned {} record(s)", colleges.len());
        Ok(colleges)
    }

    /// One college record by its directory id.
    pub async fn get(&self, college_id: &str) -> Result<Value, CollegeError> {
        let mut url = self.base_url.clone();
        // Checked in `new`; push() percent-encodes the id as a single segment.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(college_id);
        }

        let request = self.http.get(url).timeout(self.timeout);
        let response = check_status(request.send().await?, Some(college_id)).await?;
        Ok(serde_json::from_str(&response.text().await?)?)
    }
}

async fn check_status(response: Response, college_id: Option<&str>) -> Result<Response, CollegeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, college_id) {
        return Err(CollegeError::NotFound(id.to_string()));
    }
    let message = response.text().await.unwrap_or_default();
    Err(CollegeError::Api {
        status: status.as_u16(),
        message,
    })
}
