use derive_more::derive::{Display, Error};
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiFailure>;

/// Failure of a call against the Nest API.
///
/// `status_code` is only present when the upstream answered with an HTTP status. Connection,
/// DNS and TLS problems carry the message of the underlying error only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Error)]
#[serde(rename_all = "camelCase")]
#[display("{message}")]
pub struct ApiFailure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub message: String,
}

impl ApiFailure {
    /// Failure that never got an HTTP status: connection, DNS and TLS errors, or a directive
    /// lacking what is needed to call Nest at all.
    pub fn without_status(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: message.into(),
        }
    }

    pub fn upstream(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: message.into(),
        }
    }
}
