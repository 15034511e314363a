//! Verify request building and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Bodies are compared as parsed JSON, not raw
//! strings, so field ordering does not matter.

use signicat_core::client::{check_status, parse_json};
use signicat_core::{
    CreateDocumentRequest, Document, FileFormat, HttpMethod, HttpRequest, HttpResponse,
    SignicatClient, Status, Transport, TransportError,
};

const BASE_URL: &str = "https://api.idfy.io/";

/// Vectors only build requests; nothing is ever sent.
struct Offline;

impl Transport for Offline {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::new("offline"))
    }
}

fn client() -> SignicatClient<Offline> {
    SignicatClient::new(Offline, BASE_URL).unwrap()
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

fn expected_status(case: &serde_json::Value) -> Option<u16> {
    case.get("expected_error")
        .map(|e| e["status"].as_u64().unwrap() as u16)
}

/// Assert method and path; returns the parsed URL for further checks.
fn check_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) -> url::Url {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    let url = url::Url::parse(&req.url).unwrap();
    assert_eq!(
        url.path(),
        format!("/{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );
    assert!(req.url.starts_with(BASE_URL), "{name}: base url");
    url
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreateDocumentRequest = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.signature().build_create_document(&input).unwrap();
        check_request(name, &req, expected_req);

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Sent JSON decodes back to the original request
        let round_trip: CreateDocumentRequest = serde_json::from_value(req_body).unwrap();
        assert_eq!(round_trip, input, "{name}: round trip");

        // Verify parse
        let response = simulated_response(case);
        check_status(&response).unwrap();
        let document: Document = parse_json(&response).unwrap();
        let expected: Document = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(document, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Retrieve document
// ---------------------------------------------------------------------------

#[test]
fn retrieve_test_vectors() {
    let raw = include_str!("../../test-vectors/retrieve.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        // Verify build
        let req = c.signature().build_retrieve_document(id).unwrap();
        check_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");
        assert!(req.headers.is_empty(), "{name}: no headers");

        // Verify parse
        let response = simulated_response(case);
        if let Some(status) = expected_status(case) {
            let err = check_status(&response).unwrap_err();
            assert_eq!(err.status(), Some(status), "{name}: status");
        } else {
            check_status(&response).unwrap();
            let document: Document = parse_json(&response).unwrap();
            let expected: Document = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(document, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[test]
fn status_test_vectors() {
    let raw = include_str!("../../test-vectors/status.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.signature().build_retrieve_document_status(id).unwrap();
        check_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let response = simulated_response(case);
        if let Some(status) = expected_status(case) {
            let err = check_status(&response).unwrap_err();
            assert_eq!(err.status(), Some(status), "{name}: status");
        } else {
            check_status(&response).unwrap();
            let status: Status = parse_json(&response).unwrap();
            let expected: Status = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(status, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn files_test_vectors() {
    let raw = include_str!("../../test-vectors/files.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let format: FileFormat = case["file_format"].as_str().unwrap().parse().unwrap();
        let original = case["original_file_name"].as_bool().unwrap();
        let expected_req = &case["expected_request"];

        let req = c.signature().build_retrieve_file(id, format, original).unwrap();
        let url = check_request(name, &req, expected_req);
        assert!(req.body.is_none(), "{name}: body should be None");

        let query: serde_json::Map<String, serde_json::Value> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), serde_json::Value::String(v.into_owned())))
            .collect();
        assert_eq!(
            serde_json::Value::Object(query),
            expected_req["query"],
            "{name}: query"
        );

        let response = simulated_response(case);
        if let Some(status) = expected_status(case) {
            let err = check_status(&response).unwrap_err();
            assert_eq!(err.status(), Some(status), "{name}: status");
        } else {
            check_status(&response).unwrap();
            assert_eq!(
                response.body,
                case["expected_bytes"].as_str().unwrap().as_bytes(),
                "{name}: bytes"
            );
        }
    }
}
