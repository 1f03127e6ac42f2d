//! Error types for the slide packer.
//!
//! Packing a slide never fails: malformed styles, unresolved collisions and
//! degenerate input are all recovered inside the pipeline. The errors here
//! cover the surfaces around it (coordinate space validation, configuration,
//! JSON and file I/O).

/// Result type alias for slide packer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around slide packing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A canvas or source dimension is zero, negative or not finite
    #[error("Invalid coordinate space: {what} must be finite and positive, got {value}")]
    InvalidCoordinateSpace {
        /// Which dimension was rejected (e.g. "canvas width")
        what: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Packer configuration failed validation
    #[error("Invalid packer configuration: {0}")]
    InvalidConfig(String),

    /// JSON input or output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinate_space_error() {
        let err = Error::InvalidCoordinateSpace {
            what: "source width",
            value: 0.0,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("source width"));
        assert!(msg.contains("finite and positive"));
    }

    #[test]
    fn test_invalid_config_error() {
        let err = Error::InvalidConfig("height_multiplier must be positive".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid packer configuration"));
        assert!(msg.contains("height_multiplier"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(format!("{}", err).starts_with("JSON error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "deck.json");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("deck.json"));
    }
}
