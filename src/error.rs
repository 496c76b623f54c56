//! Error types shared by the simulation core and its platform collaborators

use thiserror::Error;

/// Everything that can end a session early.
///
/// There is no retryable class: resource failures abort before the loop
/// starts, render failures end the loop.
#[derive(Debug, Error)]
pub enum Error {
    /// A texture could not be loaded (missing or corrupt asset)
    #[error("could not load texture `{name}`: {reason}")]
    TextureLoad { name: String, reason: String },

    /// The surface rejected a clear/copy/present call
    #[error("could not render frame: {0}")]
    Render(String),

    /// A title or message banner could not be drawn
    #[error("could not draw banner `{text}`: {reason}")]
    Banner { text: String, reason: String },

    /// Tuning file is malformed
    #[error("invalid tuning: {0}")]
    Config(#[from] serde_json::Error),

    /// Tuning values are out of range
    #[error("invalid tuning value `{field}`: {reason}")]
    Tuning { field: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_resource() {
        let err = Error::TextureLoad {
            name: "bird_frame_1".into(),
            reason: "not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not load texture `bird_frame_1`: not found"
        );
    }

    #[test]
    fn test_json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
