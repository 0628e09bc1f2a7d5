//! Failure taxonomy. Every variant is recoverable: the site degrades to a
//! reduced-fidelity experience instead of halting.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    /// A sound asset never became ready to play.
    #[error("asset failed to load: {0}")]
    AssetLoad(String),
    /// The runtime refused to start playback (autoplay policy and friends).
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),
    #[error("speech synthesis is unavailable")]
    NarrationUnavailable,
    /// The mail service rejected or failed the request.
    #[error("mail submission failed: {0}")]
    Submission(String),
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    /// Malformed JSON or an out-of-range override.
    #[error("invalid site configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        fn parse(json: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(json)?)
        }
        let err = parse("{ nope").unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
        assert!(err.to_string().starts_with("invalid site configuration"));
    }

    #[test]
    fn field_error_names_the_field() {
        let err = FolioError::InvalidField {
            field: "email",
            reason: "must contain '@'",
        };
        assert_eq!(err.to_string(), "invalid email: must contain '@'");
    }
}
