use std::error::Error;
use clubcourt_core::errors::{CourtError, CourtResult};

#[test]
fn test_court_error_display() {
    let not_found = CourtError::NotFound("Batch nicht gefunden".to_string());
    let validation = CourtError::Validation("Ungültiger Sperrungsgrund".to_string());
    let authorization = CourtError::Authorization("Not authorized".to_string());
    let database = CourtError::Database(eyre::eyre!("Database connection failed"));
    let internal = CourtError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Batch nicht gefunden"
    );
    assert_eq!(
        validation.to_string(),
        "Validation error: Ungültiger Sperrungsgrund"
    );
    assert_eq!(
        authorization.to_string(),
        "Authorization error: Not authorized"
    );
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let court_error = CourtError::Internal(Box::new(io_error));

    assert!(court_error.source().is_some());
}

#[test]
fn test_eyre_report_converts_to_database_error() {
    fn fails() -> eyre::Result<()> {
        Err(eyre::eyre!("connection refused"))
    }

    let err: CourtError = fails().unwrap_err().into();
    assert!(matches!(err, CourtError::Database(_)));
}

#[test]
fn test_court_result() {
    let result: CourtResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: CourtResult<i32> = Err(CourtError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}
