//! In-memory transport used by unit tests.

use std::sync::Mutex;

use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

/// Records every request and answers each with the same canned outcome.
#[derive(Debug)]
pub(crate) struct RecordingTransport {
    outcome: Result<HttpResponse, String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self {
            outcome: Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: Vec::new(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(mut self, status: u16, body: &[u8]) -> Self {
        self.outcome = Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_vec(),
        });
        self
    }

    pub(crate) fn fail(mut self, message: &str) -> Self {
        self.outcome = Err(message.to_string());
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(TransportError::new(message.clone())),
        }
    }
}
