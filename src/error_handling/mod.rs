//! Error handling.
//!
//! This module provides:
//! - Error type definitions for hosts, classification codes, services and initialization
//! - Categorization of `reqwest` failures into the transport taxonomy
//! - Status code checks shared by the HTTP-backed services
//!
//! Host-level input problems degrade to "not listed" inside host lists, while
//! URL syntax errors, unknown codes and rejected credentials always propagate.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, check_service_status};
pub use types::{
    DenylistError, InitializationError, InvalidHostError, TransportError, UnknownCodeError,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_host_converts_to_denylist_error() {
        let err: DenylistError = InvalidHostError::new("-e", "bad label").into();
        assert!(matches!(err, DenylistError::InvalidHost(_)));
        assert_eq!(err.to_string(), "invalid host '-e': bad label");
    }

    #[test]
    fn test_unknown_code_converts_to_denylist_error() {
        let err: DenylistError = UnknownCodeError { code: 16 }.into();
        assert!(matches!(
            err,
            DenylistError::UnknownCode(UnknownCodeError { code: 16 })
        ));
    }

    #[test]
    fn test_invalid_url_message() {
        let err = DenylistError::invalid_url("hostname.com");
        assert_eq!(err.to_string(), "invalid URL: hostname.com");
    }
}
