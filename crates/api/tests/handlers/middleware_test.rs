use axum::response::IntoResponse;
use clubcourt_api::middleware::error_handling::AppError;
use clubcourt_core::errors::CourtError;

#[tokio::test]
async fn test_error_handling_not_found() {
    // Create a not found error
    let error = CourtError::NotFound("Batch nicht gefunden".to_string());

    // Map the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    // Create a validation error
    let error = CourtError::Validation("Ungültiger Sperrungsgrund".to_string());

    // Map the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    // Create an authorization error
    let error = CourtError::Authorization("Not authorized".to_string());

    // Map the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_database() {
    // Create a database error
    let error = CourtError::Database(eyre::eyre!("Database error"));

    // Map the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    // Create an internal error
    let error = CourtError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    // Map the error to a response
    let response = AppError(error).into_response();

    // Assert the response has the correct status code
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}
