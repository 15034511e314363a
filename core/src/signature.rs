//! Signature endpoint group: create documents, poll them, fetch signed files.
//!
//! Each operation is a `build_*` method producing the `HttpRequest` plus a
//! method that executes it through the borrowed `SignicatClient`.

use std::io::Write;

use tracing::debug;
use url::Url;

use crate::client::{request_for, SignicatClient};
use crate::enums::FileFormat;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::types::{CreateDocumentRequest, Document, Status};

/// Collection path, relative to the client's base URL.
pub const DOCUMENTS_PATH: &str = "signature/documents";

/// Signature API operations over a shared client.
#[derive(Debug)]
pub struct Signature<'a, T> {
    client: &'a SignicatClient<T>,
}

impl<T> Clone for Signature<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signature<'_, T> {}

impl<'a, T: Transport> Signature<'a, T> {
    pub fn new(client: &'a SignicatClient<T>) -> Self {
        Self { client }
    }

    pub fn build_create_document(&self, request: &CreateDocumentRequest) -> Result<HttpRequest> {
        request.validate()?;
        self.client.new_request(HttpMethod::Post, DOCUMENTS_PATH, Some(request))
    }

    pub fn build_retrieve_document(&self, document_id: &str) -> Result<HttpRequest> {
        let url = self.document_url(document_id, &[])?;
        request_for::<()>(HttpMethod::Get, url, None)
    }

    pub fn build_retrieve_document_status(&self, document_id: &str) -> Result<HttpRequest> {
        let url = self.document_url(document_id, &["status"])?;
        request_for::<()>(HttpMethod::Get, url, None)
    }

    pub fn build_retrieve_file(
        &self,
        document_id: &str,
        file_format: FileFormat,
        original_file_name: bool,
    ) -> Result<HttpRequest> {
        let mut url = self.document_url(document_id, &["files"])?;
        url.query_pairs_mut()
            .append_pair("fileFormat", file_format.as_str())
            .append_pair(
                "originalFileName",
                if original_file_name { "true" } else { "false" },
            );
        request_for::<()>(HttpMethod::Get, url, None)
    }

    /// Create a document. The response carries the server-assigned document
    /// ID and a signing URL per signer.
    pub fn create_document(&self, request: &CreateDocumentRequest) -> Result<Document> {
        let http = self.build_create_document(request)?;
        let document: Document = self.client.send_json(&http)?;
        debug!(document_id = ?document.document_id, "document created");
        Ok(document)
    }

    pub fn retrieve_document(&self, document_id: &str) -> Result<Document> {
        let http = self.build_retrieve_document(document_id)?;
        self.client.send_json(&http)
    }

    /// Status only; cheaper to poll than `retrieve_document`.
    pub fn retrieve_document_status(&self, document_id: &str) -> Result<Status> {
        let http = self.build_retrieve_document_status(document_id)?;
        self.client.send_json(&http)
    }

    /// Stream the document file in `file_format` into `sink`. Returns the
    /// number of bytes written.
    pub fn retrieve_file<W>(
        &self,
        document_id: &str,
        file_format: FileFormat,
        original_file_name: bool,
        sink: &mut W,
    ) -> Result<u64>
    where
        W: Write + ?Sized,
    {
        let http = self.build_retrieve_file(document_id, file_format, original_file_name)?;
        self.client.send_to_writer(&http, sink)
    }

    /// `signature/documents/{document_id}/{suffix...}` with the ID encoded as
    /// a single path segment.
    fn document_url(&self, document_id: &str, suffix: &[&str]) -> Result<Url> {
        if document_id.is_empty() {
            return Err(ApiError::InvalidRequest(
                "document ID must not be empty".to_string(),
            ));
        }
        // Dot segments would be dropped by URL normalization.
        if document_id == "." || document_id == ".." {
            return Err(ApiError::InvalidRequest(format!(
                "document ID {document_id:?} is not a valid path segment"
            )));
        }
        let mut url = self.client.resolve(DOCUMENTS_PATH)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                url: self.client.base_url().to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .push(document_id)
            .extend(suffix);
        Ok(url)
    }
}
