//! Verify request building and response classification against the JSON test
//! vectors stored in `test-vectors/`.
//!
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences in request bodies.

use task_core::{
    classify, ui_message, ApiLayout, ClientConfig, ErrorKind, HttpMethod, HttpResponse, NewTask,
    TaskClient, TaskUpdate,
};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "Network" => ErrorKind::Network,
        "Timeout" => ErrorKind::Timeout,
        "NotFound" => ErrorKind::NotFound,
        "Unauthorized" => ErrorKind::Unauthorized,
        "Validation" => ErrorKind::Validation,
        "Generic" => ErrorKind::Generic,
        other => panic!("unknown error kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn classify_test_vectors() {
    let raw = include_str!("../../test-vectors/classify.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["response"];
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );
        let result = classify(&response);

        if let Some(expected) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), parse_kind(expected["kind"].as_str().unwrap()), "{name}: kind");
            assert_eq!(
                err.status().map(u64::from),
                expected["status"].as_u64(),
                "{name}: status"
            );
            assert_eq!(ui_message(&err), expected["message"].as_str().unwrap(), "{name}: message");
        } else {
            assert_eq!(result.unwrap(), case["expected_payload"], "{name}: payload");
        }
    }
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();

    let expected_headers: Vec<(String, String)> = vectors["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let layout: ApiLayout = case["layout"].as_str().unwrap().parse().unwrap();
        let client = TaskClient::from_config(&ClientConfig {
            layout,
            ..ClientConfig::new(base_url)
        });
        let id = case["id"].as_str().unwrap_or_default();

        let req = match case["operation"].as_str().unwrap() {
            "health" => client.build_health(),
            "list" => client.build_list_tasks(),
            "get" => client.build_get_task(id),
            "create" => {
                let input: NewTask = serde_json::from_value(case["input"].clone()).unwrap();
                client.build_create_task(&input).unwrap()
            }
            "update" => {
                let input: TaskUpdate = serde_json::from_value(case["input"].clone()).unwrap();
                client.build_update_task(&input).unwrap()
            }
            "delete" => client.build_delete_task(id),
            "version" => client.build_version(),
            other => panic!("{name}: unknown operation {other}"),
        };

        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{base_url}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match expected_req.get("body") {
            Some(expected_body) => {
                let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&body, expected_body, "{name}: body");
            }
            None => assert!(req.body.is_none(), "{name}: body should be None"),
        }
    }
}
