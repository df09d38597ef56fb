use crate::EntityId;
use reqwest::header::InvalidHeaderValue;
use serde::Deserialize;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// The `error` object the Action API returns (with a 200 status) for a failed call.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ApiErrorPayload {
    code: String,
    #[serde(default)]
    info: String,
}

impl ApiErrorPayload {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn info(&self) -> &str {
        &self.info
    }
}

impl Display for ApiErrorPayload {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.info)
    }
}

#[derive(Debug, Error)]
pub enum BacklinkError {
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
    #[error("{0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("API URL does not contain '/w/api.php': {0}")]
    ApiUrlInvalid(String),
    #[error("{status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("API error {0}")]
    ApiError(ApiErrorPayload),
    #[error("No results found for '{0}'")]
    NoSearchResults(String),
    #[error("Empty entity ID")]
    EmptyEntityId,
    #[error("Could not find the displayed items count for {0}")]
    DisplayedCountMissing(EntityId),
    #[error("Could not extract the number of items from '{0}'")]
    DisplayedCountInvalid(String),
    #[error("Input has no column named '{0}'")]
    MissingColumn(String),
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),
    #[error("Invalid number of attempts: {0}")]
    InvalidAttempts(String),
}

impl BacklinkError {
    /// Turns a non-2xx response into `HttpStatus`, passes anything else through.
    /// # Errors
    /// Returns `HttpStatus` if the response status is not a success.
    pub fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Self> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(BacklinkError::HttpStatus {
            status,
            url: response.url().to_string(),
        })
    }
}
