//! Correlation IDs for storefront requests.
//!
//! A client may supply its own `x-request-id` so a retried checkout can be
//! followed across attempts. Anything that would not survive a round trip
//! through a header or a log line is replaced with a fresh UUIDv7.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied ID that is echoed back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// The caller's ID when it is usable, otherwise a generated one.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .as_deref()
        .map(str::trim)
        .filter(|value| is_acceptable(value))
        .map_or_else(generate_request_id, str::to_owned)
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "request id is not a valid header value: {source}"),
    }
}

/// Handlers that never set a status answered 200.
pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

fn generate_request_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_a_well_formed_caller_id() {
        assert_eq!(
            resolve_request_id(Some("checkout-retry-42".to_string())),
            "checkout-retry-42"
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(resolve_request_id(Some("  cart-7 ".to_string())), "cart-7");
    }

    #[test]
    fn replaces_ids_that_cannot_be_logged_safely() {
        for value in [
            String::new(),
            "   ".to_string(),
            "order\nforged=1".to_string(),
            "caf\u{e9}".to_string(),
            "x".repeat(MAX_REQUEST_ID_LEN + 1),
        ] {
            let resolved = resolve_request_id(Some(value.clone()));

            assert_ne!(resolved, value);
            assert!(Uuid::parse_str(&resolved).is_ok(), "got {resolved:?}");
        }
    }

    #[test]
    fn generated_ids_are_fresh_v7_uuids() {
        let first = resolve_request_id(None);
        let second = resolve_request_id(None);

        let version = Uuid::parse_str(&first)
            .ok()
            .map(|uuid| uuid.get_version_num());

        assert_eq!(version, Some(7));
        assert_ne!(resolve_request_id(None), second);
    }

    #[test]
    fn missing_status_reads_as_ok() {
        assert_eq!(response_status_or_ok(None), StatusCode::OK);
        assert_eq!(
            response_status_or_ok(Some(StatusCode::CONFLICT)),
            StatusCode::CONFLICT
        );
    }
}
