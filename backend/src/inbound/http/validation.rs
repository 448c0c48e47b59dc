//! Request validation helpers shared by the handlers.
//!
//! Every helper yields an `invalid_request` error whose details name the
//! offending field and a machine-readable reason.

use std::str::FromStr;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{
    CommentValidationError, CredentialValidationError, Error, ProjectValidationError,
    TicketValidationError,
};

/// Machine-readable validation reasons placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidValue,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidValue => "invalid_value",
            Self::MalformedBody => "malformed_body",
        }
    }
}

/// Field name as it appears in the JSON contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(
    field: FieldName,
    code: ValidationCode,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Parse an entity id, reporting the raw value on failure.
pub(crate) fn parse_id<T: FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    value.parse().map_err(|_| {
        let name = field.as_str();
        Error::invalid_request(format!("{name} must be a valid UUID")).with_details(json!({
            "field": name,
            "value": value,
            "code": ValidationCode::InvalidUuid.as_str(),
        }))
    })
}

/// Parse an optional id, treating a blank string as absent.
pub(crate) fn parse_optional_id<T: FromStr>(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<T>, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_id(raw, field))
        .transpose()
}

/// Require a present, non-blank string field.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

fn invalid_value(field: &'static str, error: &impl ToString) -> Error {
    field_error(
        FieldName::new(field),
        ValidationCode::InvalidValue,
        error.to_string(),
    )
}

pub(crate) fn credential_error(error: &CredentialValidationError) -> Error {
    invalid_value(error.field(), error)
}

pub(crate) fn project_error(error: &ProjectValidationError) -> Error {
    invalid_value(error.field(), error)
}

pub(crate) fn ticket_error(error: &TicketValidationError) -> Error {
    invalid_value(error.field(), error)
}

pub(crate) fn comment_error(error: &CommentValidationError) -> Error {
    invalid_value("text", error)
}

/// JSON extractor settings: malformed bodies and unknown fields become
/// domain `invalid_request` errors instead of plain-text 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        debug!(error = %err, "rejected JSON body");
        Error::invalid_request(format!("malformed request body: {err}"))
            .with_details(json!({ "code": ValidationCode::MalformedBody.as_str() }))
            .into()
    })
}

/// Query-string extractor settings, mirroring [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        Error::invalid_request(format!("malformed query string: {err}"))
            .with_details(json!({ "code": ValidationCode::InvalidValue.as_str() }))
            .into()
    })
}
