use embedlinker::errors::{EmbedlinkerError, Result};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let error = EmbedlinkerError::config("bad level");

        assert!(matches!(error, EmbedlinkerError::Config(_)));
        assert_eq!(error.code(), "E001");
        assert!(error.to_string().contains("Configuration Error"));
        assert!(error.to_string().contains("bad level"));
    }

    #[test]
    fn test_file_operation_error() {
        let error = EmbedlinkerError::file_operation("disk full");

        assert!(matches!(error, EmbedlinkerError::FileOperation(_)));
        assert_eq!(error.code(), "E002");
        assert_eq!(error.message(), "disk full");
    }

    #[test]
    fn test_remaining_variants() {
        let cases = [
            (EmbedlinkerError::Serialization("s".into()), "E003", "Serialization Error"),
            (EmbedlinkerError::not_found("n"), "E004", "Resource Not Found"),
        ];

        for (error, code, error_type) in cases {
            assert_eq!(error.code(), code);
            assert_eq!(error.error_type(), error_type);
            assert_eq!(
                error.format_simple(),
                format!("{}: {}", error_type, error.message())
            );
        }
    }

    #[test]
    fn test_colored_format_mentions_code() {
        let error = EmbedlinkerError::not_found("abc");
        let colored = error.format_colored();

        assert!(colored.contains("E004"));
        assert!(colored.contains("abc"));
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: EmbedlinkerError = io_error.into();

        assert!(matches!(error, EmbedlinkerError::FileOperation(_)));
        assert!(error.message().contains("denied"));
    }

    #[test]
    fn test_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let error: EmbedlinkerError = json_error.into();

        assert!(matches!(error, EmbedlinkerError::Serialization(_)));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.json")?)
        }

        let error = read_missing().unwrap_err();
        assert!(matches!(error, EmbedlinkerError::FileOperation(_)));
        assert!(error.source().is_none());
    }
}
