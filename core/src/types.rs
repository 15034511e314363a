//! Request and response records for the signature API.
//!
//! # Design
//! Field names follow the API's camelCase JSON. Optional fields are `Option`
//! or empty collections and are left out of serialized JSON entirely rather
//! than sent as `null`. Response records derive `Default` because an empty
//! response body decodes to the zero value.

use std::collections::BTreeMap;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{
    AuthMechanism, DocumentStatus, FileFormat, Language, Mechanism, NotificationSetup,
    PersonalInfoOrigin, RedirectMode, SignatureMethod,
};
use crate::error::{ApiError, Result};

fn is_false(b: &bool) -> bool {
    !*b
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Payload for `POST signature/documents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub title: String,
    /// Signing order follows the order of this list when the API enforces one.
    pub signers: Vec<SignerRequest>,
    pub data_to_sign: DataToSign,
    pub contact_details: ContactDetails,
    /// Caller-chosen correlation ID for the whole document.
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl CreateDocumentRequest {
    /// Check the fields the API requires before anything is sent.
    pub fn validate(&self) -> Result<()> {
        if self.signers.is_empty() {
            return Err(ApiError::InvalidRequest(
                "at least one signer is required".to_string(),
            ));
        }
        if self.data_to_sign.base64_content.is_empty() {
            return Err(ApiError::InvalidRequest(
                "dataToSign.base64Content is required".to_string(),
            ));
        }
        if self.data_to_sign.file_name.is_empty() {
            return Err(ApiError::InvalidRequest(
                "dataToSign.fileName is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerRequest {
    pub external_signer_id: String,
    pub redirect_settings: RedirectSettings,
    pub signature_type: SignatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_info: Option<SignerInfo>,
    /// Per-signer override of the document notification setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Notifications>,
}

impl SignerRequest {
    pub fn new(
        external_signer_id: impl Into<String>,
        redirect_mode: RedirectMode,
        mechanism: Mechanism,
    ) -> Self {
        Self {
            external_signer_id: external_signer_id.into(),
            redirect_settings: RedirectSettings::new(redirect_mode),
            signature_type: SignatureType { mechanism },
            authentication: None,
            signer_info: None,
            notifications: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectSettings {
    pub redirect_mode: RedirectMode,
    /// Parent domain for iframe modes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
}

impl RedirectSettings {
    pub fn new(redirect_mode: RedirectMode) -> Self {
        Self {
            redirect_mode,
            domain: None,
            error: None,
            cancel: None,
            success: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureType {
    pub mechanism: Mechanism,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    pub mechanism: AuthMechanism,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_security_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_method_unique_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_security_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Mobile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_info: Option<OrganizationInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mobile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// The file to be signed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataToSign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base64_content: String,
    pub file_name: String,
    #[serde(rename = "convertToPdf", default, skip_serializing_if = "is_false")]
    pub convert_to_pdf: bool,
}

impl DataToSign {
    pub fn new(file_name: impl Into<String>, base64_content: impl Into<String>) -> Self {
        Self {
            base64_content: base64_content.into(),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Base64-encode raw file content.
    pub fn from_bytes(file_name: impl Into<String>, content: &[u8]) -> Self {
        Self::new(
            file_name,
            base64::engine::general_purpose::STANDARD.encode(content),
        )
    }
}

/// Who the signers can contact about the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ContactDetails {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Notification tree
// ---------------------------------------------------------------------------

/// Document-level notification policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_request: Option<SignRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_receipt: Option<Receipt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_receipt: Option<FinalReceipt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_receipt: Option<Receipt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_receipt: Option<Receipt>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_original_file: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<Email>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sms: Vec<Sms>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Cron expression controlling when reminders go out.
    pub chron_schedule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reminders: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<Email>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sms: Vec<Sms>,
}

/// Message templates for the signature, canceled and expired receipts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<Email>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sms: Vec<Sms>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReceipt {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_recipients: Vec<AdditionalRecipient>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_signed_file: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<Email>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sms: Vec<Sms>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalRecipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    pub email: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_merge_fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sms {
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
}

/// Per-signer notification override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notifications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<Setup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<NotificationSetup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<NotificationSetup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_receipt: Option<NotificationSetup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_receipt: Option<NotificationSetup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled: Option<NotificationSetup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<NotificationSetup>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// A signing transaction as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signers: Vec<SignerResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_to_sign: Option<DataToSign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<ContactDetails>,
}

impl Document {
    /// The signer the caller registered under `external_signer_id`.
    pub fn signer_by_external_id(&self, external_signer_id: &str) -> Option<&SignerResponse> {
        self.signers
            .iter()
            .find(|s| s.external_signer_id.as_deref() == Some(external_signer_id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerResponse {
    /// Server-issued signer ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Where the signer goes to sign.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Present once the signer has signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_signature: Option<DocumentSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_signer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_settings: Option<RedirectSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_type: Option<SignatureType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_info: Option<SignerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Notifications>,
    /// Position in the required signing sequence, when one is enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(
        rename = "signUrlExpires",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sign_url_expires: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub get_social_security_number: bool,
}

/// Proof captured when a signer completes signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSignature {
    pub signature_method: SignatureMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_method_unique_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_security_number: Option<SocialSecurityNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<Mechanism>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_info_origin: Option<PersonalInfoOrigin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSecurityNumber {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Status projection of a document, cheaper to poll than the full record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_status: Option<DocumentStatus>,
    /// File formats that are ready for retrieval.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completed_packages: Vec<FileFormat>,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        self.document_status.is_some_and(|s| s.is_terminal())
    }

    pub fn has_package(&self, format: FileFormat) -> bool {
        self.completed_packages.contains(&format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateDocumentRequest {
        CreateDocumentRequest {
            title: "Loan agreement".to_string(),
            signers: vec![SignerRequest::new(
                "signer-1",
                RedirectMode::DoNotRedirect,
                Mechanism::PkiSignature,
            )],
            data_to_sign: DataToSign::new("agreement.pdf", "JVBERi0xLjQ="),
            contact_details: ContactDetails::new("legal@example.com"),
            external_id: "loan-42".to_string(),
            description: None,
            notification: None,
        }
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Loan agreement",
                "signers": [{
                    "externalSignerId": "signer-1",
                    "redirectSettings": { "redirectMode": "donot_redirect" },
                    "signatureType": { "mechanism": "pkisignature" }
                }],
                "dataToSign": { "base64Content": "JVBERi0xLjQ=", "fileName": "agreement.pdf" },
                "contactDetails": { "email": "legal@example.com" },
                "externalId": "loan-42"
            })
        );
    }

    #[test]
    fn convert_to_pdf_uses_api_casing() {
        let mut data = DataToSign::new("contract.docx", "AAAA");
        data.convert_to_pdf = true;
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["convertToPdf"], true);
    }

    #[test]
    fn from_bytes_encodes_base64() {
        let data = DataToSign::from_bytes("hello.txt", b"hello");
        assert_eq!(data.base64_content, "aGVsbG8=");
        assert_eq!(data.file_name, "hello.txt");
    }

    #[test]
    fn validate_accepts_complete_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_signers() {
        let mut req = request();
        req.signers.clear();
        assert!(matches!(req.validate(), Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn validate_rejects_missing_file() {
        let mut req = request();
        req.data_to_sign.base64_content.clear();
        assert!(matches!(req.validate(), Err(ApiError::InvalidRequest(_))));

        let mut req = request();
        req.data_to_sign.file_name.clear();
        assert!(matches!(req.validate(), Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn notification_tree_serializes_nested_templates() {
        let notification = Notification {
            sign_request: Some(SignRequest {
                include_original_file: true,
                email: vec![Email {
                    language: Language::Norwegian,
                    subject: Some("Signer".to_string()),
                    text: None,
                    sender_name: None,
                }],
                sms: Vec::new(),
            }),
            reminder: Some(Reminder {
                chron_schedule: "0 0 12 * * ?".to_string(),
                max_reminders: Some(3),
                ..Reminder::default()
            }),
            final_receipt: Some(FinalReceipt {
                additional_recipients: vec![AdditionalRecipient {
                    language: None,
                    email: "archive@example.com".to_string(),
                    custom_merge_fields: BTreeMap::from([(
                        "caseNo".to_string(),
                        "123".to_string(),
                    )]),
                }],
                include_signed_file: true,
                ..FinalReceipt::default()
            }),
            ..Notification::default()
        };

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["signRequest"]["includeOriginalFile"], true);
        assert_eq!(json["signRequest"]["email"][0]["language"], "NO");
        assert!(json["signRequest"].get("sms").is_none());
        assert_eq!(json["reminder"]["chronSchedule"], "0 0 12 * * ?");
        assert_eq!(json["reminder"]["maxReminders"], 3);
        assert_eq!(
            json["finalReceipt"]["additionalRecipients"][0]["customMergeFields"]["caseNo"],
            "123"
        );
        assert!(json.get("canceledReceipt").is_none());
    }

    #[test]
    fn document_decodes_signers_and_signature() {
        let body = r#"{
            "documentId": "doc-1",
            "signers": [{
                "id": "s-1",
                "url": "https://sign.example/s-1",
                "externalSignerId": "signer-1",
                "order": 1,
                "required": true,
                "signUrlExpires": "2024-03-01T12:00:00Z",
                "documentSignature": {
                    "signatureMethod": "no_bankid_netcentric",
                    "fullName": "Kari Nordmann",
                    "signedTime": "2024-02-20T08:30:00+01:00",
                    "mechanism": "pkisignature",
                    "personalInfoOrigin": "eid"
                }
            }],
            "status": { "documentStatus": "signed", "completedPackages": ["pades", "native"] }
        }"#;
        let doc: Document = serde_json::from_str(body).unwrap();
        assert_eq!(doc.document_id.as_deref(), Some("doc-1"));
        let signer = doc.signer_by_external_id("signer-1").unwrap();
        assert_eq!(signer.order, Some(1));
        assert!(signer.required);
        assert!(signer.sign_url_expires.is_some());
        let signature = signer.document_signature.as_ref().unwrap();
        assert_eq!(signature.signature_method, SignatureMethod::NoBankIdNetCentric);
        assert_eq!(signature.personal_info_origin, Some(PersonalInfoOrigin::Eid));
        assert_eq!(
            signature.signed_time.unwrap().to_rfc3339(),
            "2024-02-20T07:30:00+00:00"
        );
        let status = doc.status.unwrap();
        assert!(status.is_terminal());
        assert!(status.has_package(FileFormat::Pades));
        assert!(!status.has_package(FileFormat::Xades));
    }

    #[test]
    fn status_with_unknown_value_is_rejected() {
        let result: std::result::Result<Status, _> =
            serde_json::from_str(r#"{"documentStatus":"archived"}"#);
        assert!(result.is_err());
    }
}
