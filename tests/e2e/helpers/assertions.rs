use reqwest::StatusCode;
use storefront_client::error::AppError;

/// Assert a backend rejection with the given status and, when given, detail
pub fn assert_request_failed(err: &AppError, status: StatusCode, detail: Option<&str>) {
    assert!(
        matches!(err, AppError::Request { .. }),
        "Expected request error, got {:?}",
        err
    );
    assert_eq!(err.status_code(), Some(status), "Status mismatch: {}", err);

    if let Some(detail) = detail {
        assert_eq!(err.detail(), Some(detail), "Detail mismatch: {}", err);
    }
}

pub fn assert_unauthorized(err: &AppError) {
    assert!(
        matches!(err, AppError::Unauthorized),
        "Expected Unauthorized, got {:?}",
        err
    );
    assert_eq!(err.to_string(), "Unauthorized: please log in again");
}

pub fn assert_logged_out(client: &super::api_client::TestClient) {
    let tokens = client.session().tokens();
    assert_eq!(tokens.access(), None, "Access token should be cleared");
    assert_eq!(tokens.refresh(), None, "Refresh token should be cleared");
}
