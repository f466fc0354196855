//! Verify client operations against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes an operation, the request it must send, a simulated
//! response, and the expected envelope. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use std::sync::Arc;

use rest_core::{ErrorKind, HttpMethod, RestClient};

mod common;
use common::{ScriptedTransport, Widget};

const BASE_URL: &str = "http://localhost:3000";

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "HttpStatus" => ErrorKind::HttpStatus,
        "Decode" => ErrorKind::Decode,
        "Transport" => ErrorKind::Transport,
        "Encode" => ErrorKind::Encode,
        other => panic!("unknown error kind: {other}"),
    }
}

/// Envelope fields compared against `expected_result`.
struct Observed {
    success: bool,
    error: Option<(ErrorKind, Option<u16>)>,
    value: Option<Widget>,
    values: Option<Vec<Widget>>,
}

#[tokio::test]
async fn pipeline_test_vectors() {
    let raw = include_str!("../../test-vectors/pipeline.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = case["url"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let transport = Arc::new(ScriptedTransport::respond(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        ));
        let client = RestClient::with_transport(Arc::clone(&transport), Some(BASE_URL));

        let payload = || -> Widget { serde_json::from_value(case["payload"].clone()).unwrap() };
        let observed = match case["operation"].as_str().unwrap() {
            "fetch_one" => {
                let r = client.fetch_one::<Widget>(url).await;
                Observed {
                    success: r.is_success(),
                    error: r.error().map(|e| (e.kind(), e.status_code())),
                    value: r.into_value(),
                    values: None,
                }
            }
            "fetch_many" => {
                let r = client.fetch_many::<Widget>(url).await;
                Observed {
                    success: r.is_success(),
                    error: r.error().map(|e| (e.kind(), e.status_code())),
                    value: None,
                    values: r.into_values(),
                }
            }
            op @ ("create" | "patch" | "replace") => {
                let payload = payload();
                let r = match op {
                    "create" => client.create(url, &payload).await,
                    "patch" => client.patch(url, &payload).await,
                    _ => client.replace(url, &payload).await,
                };
                Observed {
                    success: r.is_success(),
                    error: r.error().map(|e| (e.kind(), e.status_code())),
                    value: r.into_value(),
                    values: None,
                }
            }
            "delete" => {
                let r = client.delete(url).await;
                Observed {
                    success: r.is_success(),
                    error: r.error().map(|e| (e.kind(), e.status_code())),
                    value: None,
                    values: None,
                }
            }
            other => panic!("{name}: unknown operation: {other}"),
        };

        // Verify request
        let expected_req = &case["expected_request"];
        let sent = transport.sent();
        assert_eq!(sent.len(), 1, "{name}: exactly one request");
        assert_eq!(sent[0].method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(sent[0].url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        match sent[0].body.as_deref() {
            Some(body) => {
                let body: serde_json::Value = serde_json::from_slice(body).unwrap();
                assert_eq!(body, expected_req["body"], "{name}: body");
            }
            None => assert!(expected_req["body"].is_null(), "{name}: body should be None"),
        }

        // Verify envelope
        let expected = &case["expected_result"];
        assert_eq!(observed.success, expected["success"].as_bool().unwrap(), "{name}: success");
        match expected.get("error_kind") {
            Some(kind) => {
                let (actual_kind, actual_status) = observed.error.expect("error detail");
                assert_eq!(actual_kind, parse_kind(kind.as_str().unwrap()), "{name}: kind");
                let status = expected.get("error_status").and_then(|s| s.as_u64()).map(|s| s as u16);
                assert_eq!(actual_status, status, "{name}: error status");
            }
            None => assert!(observed.error.is_none(), "{name}: unexpected error"),
        }

        let value: Option<Widget> = expected.get("value").map(|v| serde_json::from_value(v.clone()).unwrap());
        assert_eq!(observed.value, value, "{name}: value");
        let values: Option<Vec<Widget>> =
            expected.get("values").map(|v| serde_json::from_value(v.clone()).unwrap());
        assert_eq!(observed.values, values, "{name}: values");
    }
}
