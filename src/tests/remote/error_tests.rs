use std::cell::Cell;

use serde_json::json;

use super::*;
use crate::remote::http_client::with_retries;

#[test]
fn classify_maps_statuses() {
    assert!(matches!(
        GatewayError::classify(400, json!({})),
        GatewayError::Validation { status: 400, .. }
    ));
    assert!(matches!(
        GatewayError::classify(422, json!({})),
        GatewayError::Validation { .. }
    ));
    assert!(matches!(
        GatewayError::classify(401, json!({})),
        GatewayError::Auth { .. }
    ));
    assert!(matches!(
        GatewayError::classify(404, json!({})),
        GatewayError::NotFound { .. }
    ));
    assert!(matches!(
        GatewayError::classify(409, json!({})),
        GatewayError::Conflict { .. }
    ));
    let other = GatewayError::classify(503, json!("down"));
    assert!(matches!(other, GatewayError::Http { status: 503, .. }));
    assert_eq!(other.status(), Some(503));
    assert_eq!(other.body(), Some(&json!("down")));
}

#[test]
fn field_errors_parse_drf_bodies() {
    let err = GatewayError::classify(
        400,
        json!({
            "quantity": ["A valid number is required."],
            "unit": "Too long.",
            "detail": "ignored",
        }),
    );
    let fields = err.field_errors();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields["quantity"], vec!["A valid number is required."]);
    assert_eq!(fields["unit"], vec!["Too long."]);
}

#[test]
fn field_errors_empty_for_other_kinds() {
    let err = GatewayError::classify(500, json!({ "quantity": ["x"] }));
    assert!(err.field_errors().is_empty());
    assert!(GatewayError::network("list", "refused").field_errors().is_empty());
}

#[test]
fn user_message_prefers_server_detail() {
    let err = GatewayError::classify(404, json!({ "detail": "Not found." }));
    assert_eq!(err.user_message(), "Not found.");

    let err = GatewayError::classify(409, json!({ "error": "Already in list" }));
    assert_eq!(err.user_message(), "Already in list");
}

#[test]
fn user_message_falls_back_per_kind() {
    let err = GatewayError::classify(
        400,
        json!({ "rating": ["Ensure this value is less than or equal to 5."] }),
    );
    assert_eq!(
        err.user_message(),
        "rating: Ensure this value is less than or equal to 5."
    );
    assert_eq!(
        GatewayError::classify(502, json!("<html>")).user_message(),
        "server error (502)"
    );
    assert!(GatewayError::network("x", "refused").user_message().contains("reach"));
    assert!(GatewayError::Unsupported("update").user_message().contains("update"));
}

#[test]
fn retries_only_network_failures() {
    let calls = Cell::new(0);
    let out: Result<u32, GatewayError> = with_retries("list", 3, || {
        calls.set(calls.get() + 1);
        if calls.get() < 2 {
            Err(GatewayError::network("list", "reset"))
        } else {
            Ok(7)
        }
    });
    assert_eq!(out.ok(), Some(7));
    assert_eq!(calls.get(), 2);

    let calls = Cell::new(0);
    let out: Result<u32, GatewayError> = with_retries("list", 3, || {
        calls.set(calls.get() + 1);
        Err(GatewayError::classify(500, json!({})))
    });
    assert!(matches!(out, Err(GatewayError::Http { .. })));
    assert_eq!(calls.get(), 1);
}

#[test]
fn gives_up_after_the_last_attempt() {
    let calls = Cell::new(0);
    let out: Result<(), GatewayError> = with_retries("list", 1, || {
        calls.set(calls.get() + 1);
        Err(GatewayError::network("list", "refused"))
    });
    assert!(out.is_err_and(|e| e.is_network()));
    assert_eq!(calls.get(), 1);
}
