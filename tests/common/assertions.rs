//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error response carries the JSON `{status, error}` body
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Full response: {}",
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert an ambient response is structurally valid
pub fn assert_valid_ambient(json: &serde_json::Value) {
    assert!(json["request_id"].as_u64().is_some_and(|id| id > 0));
    assert!(json["genre"].is_string());
    assert!(json["pattern"].is_string());

    let palette = &json["palette"];
    assert_eq!(palette["hex"].as_array().map(Vec::len), Some(5));
    assert_eq!(palette["layer_opacity"].as_array().map(Vec::len), Some(5));
    for role in ["primary", "secondary", "tertiary", "accent", "highlight"] {
        let channels = palette[role].as_array().expect("role color");
        assert_eq!(channels.len(), 3, "{role} should be [r, g, b]");
        for c in channels {
            let c = c.as_f64().unwrap();
            assert!((0.0..=1.0).contains(&c), "{role} channel {c} out of range");
        }
    }

    let gradient = &json["gradient"];
    assert!(gradient["orbs"].is_array());
    assert!(gradient["composition"].is_object());
}
