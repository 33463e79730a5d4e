//! Shared HTTP response helpers for the resource clients.
//!
//! Centralizes status-code classification so the resource modules stay
//! focused on request construction and response mapping.

use daybook_core::errors::FieldErrors;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success. Otherwise:
/// - **401** → [`ApiError::Unauthorized`]
/// - **404** → [`ApiError::NotFound`] with the backend's message
/// - **other 4xx** → [`ApiError::Validation`] with the parsed field errors
/// - **anything else** → [`ApiError::Api`] with status and message
///
/// # Errors
///
/// As listed above.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let body = resp.text().await.unwrap_or_default();
    let errors = FieldErrors::from_body(&body);
    if status.is_client_error() && status != reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::Validation(errors));
    }
    let message = if errors.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        errors.summary()
    };
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(message));
    }
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Check the status, then decode the JSON body.
///
/// # Errors
///
/// [`check_response`] errors, or [`ApiError::Parse`] for a malformed body.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let resp = check_response(resp).await?;
    let bytes = resp.bytes().await.map_err(ApiError::from_transport)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Append URL-encoded query parameters to `path`, skipping `None` values.
#[must_use]
pub fn with_query(path: &str, params: &[(&str, Option<String>)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|value| format!("{key}={}", urlencoding::encode(value)))
        })
        .collect();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_unauthorized() {
        let err = check_response(mock_response(401, "")).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn check_response_not_found_keeps_message() {
        let err = check_response(mock_response(
            404,
            r#"{"message": "No reflection for today yet"}"#,
        ))
        .await
        .unwrap_err();
        let ApiError::NotFound(message) = err else {
            panic!("expected not found, got {err:?}");
        };
        assert_eq!(message, "No reflection for today yet");
    }

    #[tokio::test]
    async fn check_response_validation() {
        let err = check_response(mock_response(
            400,
            r#"{"error": "Invalid date format. Use YYYY-MM-DD"}"#,
        ))
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid date format. Use YYYY-MM-DD");
    }

    #[tokio::test]
    async fn check_response_api_error() {
        let err = check_response(mock_response(500, "")).await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(204, "")).await.is_ok());
    }

    #[test]
    fn with_query_encodes_and_skips_missing_values() {
        let path = with_query(
            "/api/self-reflection/questions/",
            &[
                ("is_active", Some("true".into())),
                ("category", None),
                ("search", Some("sleep & mood".into())),
            ],
        );
        assert_eq!(
            path,
            "/api/self-reflection/questions/?is_active=true&search=sleep%20%26%20mood"
        );
        assert_eq!(with_query("/api/diary/stats/", &[("x", None)]), "/api/diary/stats/");
    }

    #[tokio::test]
    async fn read_json_reports_malformed_bodies() {
        let err = read_json::<Vec<u32>>(mock_response(200, "{\"oops\": true}"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));

        let values: Vec<u32> = read_json(mock_response(200, "[1, 2]")).await.expect("parse");
        assert_eq!(values, vec![1, 2]);
    }
}
