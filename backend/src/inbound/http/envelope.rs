//! JSON envelopes exchanged by the form endpoints.
//!
//! Request bodies are deliberately loose: every field is optional, text fields
//! also take numbers and booleans (rendered as text), and `age` accepts numbers
//! or text, so the domain validator sees what the client sent and can report
//! every problem at once.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{ErrorCode, RawAge, Submission, SubmissionDraft};

/// Body of `POST /submit-form`, as JSON or `application/x-www-form-urlencoded`.
///
/// Example JSON:
/// `{"name":"Ann","email":"ann@x.com","age":"30","message":"hi"}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct SubmitFormRequest {
    #[serde(default)]
    pub name: Option<TextField>,
    #[serde(default)]
    pub email: Option<TextField>,
    #[serde(default)]
    pub age: Option<AgeField>,
    #[serde(default)]
    pub message: Option<TextField>,
}

/// A text field as sent by the client. Scalars are accepted and stored as
/// their textual form, so `"name": 123` stores `"123"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TextField {
    Text(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

impl From<TextField> for String {
    fn from(value: TextField) -> Self {
        match value {
            TextField::Text(text) => text,
            TextField::Integer(value) => value.to_string(),
            TextField::Number(value) => value.to_string(),
            TextField::Boolean(value) => value.to_string(),
        }
    }
}

/// `age` as sent by the client.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AgeField {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl From<AgeField> for RawAge {
    fn from(value: AgeField) -> Self {
        match value {
            AgeField::Integer(value) => Self::Integer(value),
            AgeField::Number(value) => Self::Number(value),
            AgeField::Text(value) => Self::Text(value),
        }
    }
}

impl From<SubmitFormRequest> for SubmissionDraft {
    fn from(value: SubmitFormRequest) -> Self {
        Self {
            name: value.name.map(String::from),
            email: value.email.map(String::from),
            age: value.age.map(RawAge::from),
            message: value.message.map(String::from),
        }
    }
}

/// A stored submission as rendered to clients.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionBody {
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u8,
    pub message: String,
    /// RFC 3339 timestamp in UTC.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
}

impl From<&Submission> for SubmissionBody {
    fn from(value: &Submission) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            email: value.email().to_owned(),
            age: value.age().get(),
            message: value.message().to_owned(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

/// Success envelope for `POST /submit-form`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct SubmitFormSuccess {
    pub success: bool,
    pub message: String,
    pub data: SubmissionBody,
}

impl SubmitFormSuccess {
    pub const MESSAGE: &'static str = "Form submitted successfully!";

    pub fn new(submission: &Submission) -> Self {
        Self {
            success: true,
            message: Self::MESSAGE.to_owned(),
            data: SubmissionBody::from(submission),
        }
    }
}

/// Success envelope for `GET /users`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct SubmissionListing {
    pub success: bool,
    pub count: usize,
    pub data: Vec<SubmissionBody>,
}

impl SubmissionListing {
    pub fn new(submissions: &[Submission]) -> Self {
        Self {
            success: true,
            count: submissions.len(),
            data: submissions.iter().map(SubmissionBody::from).collect(),
        }
    }
}

/// Failure envelope shared by every form endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct FailureEnvelope {
    pub success: bool,
    /// Names the operation that failed.
    pub message: String,
    /// Client-safe description of the failure.
    pub error: String,
    pub code: ErrorCode,
    /// Field errors as `[{field, code, message}]` for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!(30), Some(AgeField::Integer(30)))]
    #[case(json!(30.5), Some(AgeField::Number(30.5)))]
    #[case(json!("30"), Some(AgeField::Text("30".into())))]
    #[case(json!(null), None)]
    fn age_accepts_numbers_and_text(#[case] age: Value, #[case] expected: Option<AgeField>) {
        let request: SubmitFormRequest =
            serde_json::from_value(json!({ "name": "Ann", "age": age })).expect("decodes");

        assert_eq!(request.age, expected);
        assert!(request.email.is_none());
    }

    #[rstest]
    #[case(json!("Ann"), "Ann")]
    #[case(json!(123), "123")]
    #[case(json!(4.5), "4.5")]
    #[case(json!(true), "true")]
    fn text_fields_take_scalars_as_text(#[case] name: Value, #[case] expected: &str) {
        let request: SubmitFormRequest =
            serde_json::from_value(json!({ "name": name, "message": 7 })).expect("decodes");

        let draft = SubmissionDraft::from(request);
        assert_eq!(draft.name.as_deref(), Some(expected));
        assert_eq!(draft.message.as_deref(), Some("7"));
    }

    #[rstest]
    fn text_fields_reject_structured_json() {
        let body = json!({ "name": { "first": "Ann" } });
        let result = serde_json::from_value::<SubmitFormRequest>(body);

        assert!(result.is_err());
    }

    #[rstest]
    fn age_rejects_other_json_types() {
        let result = serde_json::from_value::<SubmitFormRequest>(json!({ "age": [30] }));

        assert!(result.is_err());
    }

    #[rstest]
    fn failure_envelope_omits_absent_details() {
        let envelope = FailureEnvelope {
            success: false,
            message: "Error retrieving users".into(),
            error: "Data store unavailable".into(),
            code: ErrorCode::StoreUnavailable,
            details: None,
        };

        let value = serde_json::to_value(envelope).expect("serialises");
        assert_eq!(
            value,
            json!({
                "success": false,
                "message": "Error retrieving users",
                "error": "Data store unavailable",
                "code": "store_unavailable",
            })
        );
    }
}
