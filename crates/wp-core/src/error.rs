use thiserror::Error;

use crate::exception::Exception;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{code}: {message}")]
pub struct WaypointError {
    pub code: String,
    pub message: String,
    pub exception: Option<Exception>,
}

impl WaypointError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            exception: None,
        }
    }

    pub fn unhandled(exception: Exception) -> Self {
        Self {
            code: "ENGINE_UNHANDLED_EXCEPTION".to_string(),
            message: exception.message().to_string(),
            exception: Some(exception),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::ExceptionClass;

    #[test]
    fn new_keeps_code_and_message() {
        let error = WaypointError::new("ENGINE_UNKNOWN_POINT", "Point \"top\" is not registered.");
        assert_eq!(error.code, "ENGINE_UNKNOWN_POINT");
        assert_eq!(error.message, "Point \"top\" is not registered.");
        assert!(error.exception.is_none());
    }

    #[test]
    fn display_joins_code_and_message() {
        let error = WaypointError::new("ENGINE_DUPLICATE_POINT", "Point \"top\" is already live.");
        assert_eq!(
            error.to_string(),
            "ENGINE_DUPLICATE_POINT: Point \"top\" is already live."
        );
    }

    #[test]
    fn unhandled_carries_exception_and_its_message() {
        let exception = Exception::new(ExceptionClass::error(), "boom");
        let error = WaypointError::unhandled(exception.clone());
        assert_eq!(error.code, "ENGINE_UNHANDLED_EXCEPTION");
        assert_eq!(error.message, "boom");
        assert_eq!(error.exception, Some(exception));
    }
}
