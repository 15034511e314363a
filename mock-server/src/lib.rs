use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

/// Formats a signed document can be packaged as.
const FILE_FORMATS: &[&str] = &["unsigned", "native", "standard_packaging", "pades", "xades"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: String,
    pub title: String,
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub signers: Vec<Signer>,
    pub status: Status,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    pub id: String,
    pub url: String,
    pub external_signer_id: String,
    pub order: i32,
    pub required: bool,
    pub signature_type: SignatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_signature: Option<DocumentSignature>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSignature {
    pub signature_method: String,
    pub mechanism: String,
    pub signed_time: String,
    pub personal_info_origin: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub document_status: String,
    #[serde(default)]
    pub completed_packages: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    pub title: String,
    pub signers: Vec<SignerInput>,
    pub data_to_sign: DataToSign,
    pub external_id: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerInput {
    pub external_signer_id: String,
    pub signature_type: SignatureType,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignatureType {
    pub mechanism: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataToSign {
    pub base64_content: String,
    pub file_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesQuery {
    pub file_format: String,
    #[serde(default)]
    pub original_file_name: bool,
}

#[derive(Clone, Debug)]
pub struct StoredDocument {
    pub document: Document,
    pub file_name: String,
    pub content: Vec<u8>,
}

pub type Db = Arc<RwLock<HashMap<String, StoredDocument>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/signature/documents", post(create_document))
        .route("/signature/documents/{id}", get(get_document))
        .route("/signature/documents/{id}/status", get(get_status))
        .route("/signature/documents/{id}/files", get(get_file))
        // Test control: completes signing for every signer.
        .route("/signature/documents/{id}/sign", post(sign_document))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_document(
    State(db): State<Db>,
    Json(input): Json<CreateDocument>,
) -> Result<Json<Document>, StatusCode> {
    if input.signers.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let content = base64::engine::general_purpose::STANDARD
        .decode(input.data_to_sign.base64_content.as_bytes())
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    let document_id = Uuid::new_v4().to_string();
    let signers = input
        .signers
        .into_iter()
        .zip(1..)
        .map(|(signer, order)| {
            let id = Uuid::new_v4().to_string();
            Signer {
                url: format!("http://mock.local/sign/{document_id}/{id}"),
                id,
                external_signer_id: signer.external_signer_id,
                order,
                required: true,
                signature_type: signer.signature_type,
                document_signature: None,
            }
        })
        .collect();

    let document = Document {
        document_id: document_id.clone(),
        title: input.title,
        external_id: input.external_id,
        description: input.description,
        signers,
        status: Status {
            document_status: "unsigned".to_string(),
            completed_packages: Vec::new(),
        },
    };
    info!(%document_id, "document created");

    db.write().await.insert(
        document_id,
        StoredDocument {
            document: document.clone(),
            file_name: input.data_to_sign.file_name,
            content,
        },
    );
    Ok(Json(document))
}

async fn get_document(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Document>, StatusCode> {
    let docs = db.read().await;
    docs.get(&id)
        .map(|stored| Json(stored.document.clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_status(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Status>, StatusCode> {
    let docs = db.read().await;
    docs.get(&id)
        .map(|stored| Json(stored.document.status.clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_file(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(query): Query<FilesQuery>,
) -> Result<Response, StatusCode> {
    if !FILE_FORMATS.contains(&query.file_format.as_str()) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let docs = db.read().await;
    let stored = docs.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    let ready = matches!(query.file_format.as_str(), "unsigned" | "native")
        || stored
            .document
            .status
            .completed_packages
            .contains(&query.file_format);
    if !ready {
        return Err(StatusCode::NOT_FOUND);
    }

    let file_name = if query.original_file_name {
        stored.file_name.clone()
    } else {
        format!("{id}.pdf")
    };
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    Ok((headers, stored.content.clone()).into_response())
}

async fn sign_document(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Document>, StatusCode> {
    let mut docs = db.write().await;
    let stored = docs.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    for signer in &mut stored.document.signers {
        signer.document_signature = Some(DocumentSignature {
            signature_method: "sms_otp".to_string(),
            mechanism: signer.signature_type.mechanism.clone(),
            signed_time: "2024-01-01T00:00:00Z".to_string(),
            personal_info_origin: "userFormInput".to_string(),
        });
    }
    stored.document.status = Status {
        document_status: "signed".to_string(),
        completed_packages: vec!["pades".to_string()],
    };
    info!(document_id = %id, "document signed");
    Ok(Json(stored.document.clone()))
}
