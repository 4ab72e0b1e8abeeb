//! Contact form submission model and its validation rules.
//!
//! Purpose: turn loosely typed form input into a [`NewSubmission`] that
//! satisfies every field constraint, or report all violated constraints at
//! once. Validation is pure; persistence happens elsewhere.
//!
//! Field rules:
//! - `name`, `message`: required, trimmed, non-empty.
//! - `email`: required, trimmed, lowercased, non-empty.
//! - `age`: required number in `AGE_MIN..=AGE_MAX`; text is read up to the
//!   first non-digit and fractions are truncated.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::Error;

/// Smallest accepted age.
pub const AGE_MIN: u8 = 1;
/// Largest accepted age.
pub const AGE_MAX: u8 = 120;

/// Fields of a submission, used to attribute validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionField {
    Name,
    Email,
    Age,
    Message,
}

impl SubmissionField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Age => "age",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field was absent or null.
    Missing,
    /// The field was present but blank after trimming.
    Empty,
    /// The value does not start with a number.
    NotAnInteger,
    /// The value fell outside the inclusive bounds.
    OutOfRange { min: u8, max: u8 },
}

impl FieldErrorKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Missing => "missing_field",
            Self::Empty => "empty_field",
            Self::NotAnInteger => "not_an_integer",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// A constraint violation on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    field: SubmissionField,
    kind: FieldErrorKind,
}

impl FieldError {
    /// Pair a field with the reason it was rejected.
    pub fn new(field: SubmissionField, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Field that failed.
    pub fn field(&self) -> SubmissionField {
        self.field
    }

    /// Why it failed.
    pub fn kind(&self) -> FieldErrorKind {
        self.kind
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field;
        match self.kind {
            FieldErrorKind::Missing => write!(f, "{field} is required"),
            FieldErrorKind::Empty => write!(f, "{field} must not be empty"),
            FieldErrorKind::NotAnInteger => write!(f, "{field} must be a number"),
            FieldErrorKind::OutOfRange { min, max } => {
                write!(f, "{field} must be between {min} and {max}")
            }
        }
    }
}

/// Every constraint violated by a draft, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionValidationErrors(Vec<FieldError>);

impl SubmissionValidationErrors {
    /// Iterate over the individual field errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Number of violated constraints.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no constraint was violated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `field` is among the failures.
    pub fn contains(&self, field: SubmissionField) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    fn details(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|error| {
                    json!({
                        "field": error.field.as_str(),
                        "code": error.kind.code(),
                        "message": error.to_string(),
                    })
                })
                .collect(),
        )
    }
}

impl fmt::Display for SubmissionValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("submission validation failed: ")?;
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SubmissionValidationErrors {}

impl From<SubmissionValidationErrors> for Error {
    fn from(errors: SubmissionValidationErrors) -> Self {
        let details = errors.details();
        Error::validation(errors.to_string()).with_details(details)
    }
}

/// Age exactly as it arrived on the wire, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAge {
    /// A JSON integer.
    Integer(i64),
    /// A JSON number with a fractional representation.
    Number(f64),
    /// Text, as sent by HTML forms.
    Text(String),
}

/// Unvalidated submission input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<RawAge>,
    pub message: Option<String>,
}

/// Validated age within `AGE_MIN..=AGE_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(u8);

impl Age {
    /// Accept `value` when it lies within the allowed bounds.
    pub fn new(value: i64) -> Result<Self, FieldErrorKind> {
        u8::try_from(value)
            .ok()
            .filter(|age| (AGE_MIN..=AGE_MAX).contains(age))
            .map(Self)
            .ok_or(FieldErrorKind::OutOfRange {
                min: AGE_MIN,
                max: AGE_MAX,
            })
    }

    /// Age in years.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Opaque identifier assigned when a submission is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A draft that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    name: String,
    email: String,
    age: Age,
    message: String,
}

impl NewSubmission {
    /// Stamp the submission with its identity and creation time.
    pub fn into_submission(self, id: SubmissionId, created_at: DateTime<Utc>) -> Submission {
        let Self {
            name,
            email,
            age,
            message,
        } = self;
        Submission {
            id,
            name,
            email,
            age,
            message,
            created_at,
        }
    }
}

/// A stored contact form submission.
///
/// ## Invariants
/// - Every field satisfies the rules enforced by [`validate_submission`].
/// - `id` never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    id: SubmissionId,
    name: String,
    email: String,
    age: Age,
    message: String,
    created_at: DateTime<Utc>,
}

impl Submission {
    /// Rebuild a submission from persisted values, re-checking the field rules.
    pub fn restore(
        id: SubmissionId,
        created_at: DateTime<Utc>,
        fields: SubmissionDraft,
    ) -> Result<Self, SubmissionValidationErrors> {
        validate_submission(fields).map(|new| new.into_submission(id, created_at))
    }

    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Validate a draft, reporting every violated constraint.
///
/// # Examples
/// ```
/// use contact_form::domain::{RawAge, SubmissionDraft, validate_submission};
///
/// let draft = SubmissionDraft {
///     name: Some(" Ann ".into()),
///     email: Some("ANN@X.COM ".into()),
///     age: Some(RawAge::Text("30".into())),
///     message: Some("hi".into()),
/// };
/// let valid = validate_submission(draft).expect("valid draft");
/// let stored = valid.into_submission(
///     contact_form::domain::SubmissionId::random(),
///     chrono::Utc::now(),
/// );
/// assert_eq!(stored.email(), "ann@x.com");
/// assert_eq!(stored.age().get(), 30);
/// ```
pub fn validate_submission(
    draft: SubmissionDraft,
) -> Result<NewSubmission, SubmissionValidationErrors> {
    let SubmissionDraft {
        name,
        email,
        age,
        message,
    } = draft;
    let mut errors = Vec::new();

    let name = keep_ok(required_text(SubmissionField::Name, name), &mut errors);
    let email = keep_ok(
        required_text(SubmissionField::Email, email).map(|email| email.to_lowercase()),
        &mut errors,
    );
    let age = keep_ok(coerce_age(age), &mut errors);
    let message = keep_ok(required_text(SubmissionField::Message, message), &mut errors);

    match (name, email, age, message) {
        (Some(name), Some(email), Some(age), Some(message)) => Ok(NewSubmission {
            name,
            email,
            age,
            message,
        }),
        _ => Err(SubmissionValidationErrors(errors)),
    }
}

fn keep_ok<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    result.map_err(|error| errors.push(error)).ok()
}

fn required_text(field: SubmissionField, value: Option<String>) -> Result<String, FieldError> {
    let value = value.ok_or(FieldError::new(field, FieldErrorKind::Missing))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, FieldErrorKind::Empty));
    }
    Ok(trimmed.to_owned())
}

fn coerce_age(raw: Option<RawAge>) -> Result<Age, FieldError> {
    let fail = |kind| FieldError::new(SubmissionField::Age, kind);
    let whole = match raw {
        None => return Err(fail(FieldErrorKind::Missing)),
        Some(RawAge::Integer(value)) => value,
        Some(RawAge::Number(value)) => truncate(value).ok_or(fail(FieldErrorKind::NotAnInteger))?,
        Some(RawAge::Text(text)) => {
            if text.trim().is_empty() {
                return Err(fail(FieldErrorKind::Missing));
            }
            leading_integer(&text).ok_or(fail(FieldErrorKind::NotAnInteger))?
        }
    };
    Age::new(whole).map_err(fail)
}

/// Drop the fractional part, so `30.7` reads as 30.
fn truncate(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "saturating conversion; out-of-range values fail the age bounds"
    )]
    let whole = value.trunc() as i64;
    Some(whole)
}

/// Read the optionally signed run of digits at the start of `text`, ignoring
/// leading whitespace and anything after the digits: `"30 years"` and
/// `"30.5"` both read as 30.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let digits = rest.get(..digits).filter(|digits| !digits.is_empty())?;
    // Overlong digit runs saturate; they fail the age bounds either way.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
