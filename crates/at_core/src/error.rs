use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Boundary call failed: {0}")]
    Boundary(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TrackError {
    /// Boundary failures are best-effort by design: the loop logs them
    /// and continues on the next tick.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TrackError::Boundary(_))
    }
}

pub type Result<T> = std::result::Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_errors_are_recoverable() {
        assert!(TrackError::Boundary("actuator offline".into()).is_recoverable());
        assert!(!TrackError::InvalidParameter("max_step".into()).is_recoverable());
    }

    #[test]
    fn test_display_format() {
        let err = TrackError::InvalidParameter("measurement_noise must be > 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid parameter: measurement_noise must be > 0"
        );
    }
}
