//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection is an `invalid_request` error whose details name the
//! offending field and a stable code, e.g.
//! `{"field": "email", "code": "too_long", "max": 50}`.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UserField, UserId, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankField,
    TooLong,
    InvalidEmail,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankField => "blank_field",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const FIRST_NAME: FieldName = FieldName::new("firstName");
pub(crate) const LAST_NAME: FieldName = FieldName::new("lastName");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const ID: FieldName = FieldName::new("id");

/// Wire name of a domain user field.
pub(crate) fn field_name(field: UserField) -> FieldName {
    match field {
        UserField::Email => EMAIL,
        UserField::FirstName => FIRST_NAME,
        UserField::LastName => LAST_NAME,
        UserField::Password => PASSWORD,
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_id_error(value: &str) -> Error {
    let field = ID.as_str();
    Error::invalid_request(format!("{field} must be an integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidId.as_str(),
    }))
}

/// Translate a domain validation failure into a 400 payload.
pub(crate) fn user_validation_error(err: UserValidationError) -> Error {
    let field = field_name(err.field()).as_str();
    let message = err.to_string();
    let details = match err {
        UserValidationError::Blank { .. } => json!({
            "field": field,
            "code": ErrorCode::BlankField.as_str(),
        }),
        UserValidationError::TooLong { max, .. } => json!({
            "field": field,
            "code": ErrorCode::TooLong.as_str(),
            "max": max,
        }),
        UserValidationError::InvalidEmail => json!({
            "field": field,
            "code": ErrorCode::InvalidEmail.as_str(),
        }),
    };
    Error::invalid_request(message).with_details(details)
}

/// Unwrap a field that must be present in the payload.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse the `{id}` path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<i64>()
        .map(UserId::new)
        .map_err(|_| invalid_id_error(raw))
}

/// `JsonConfig` error handler rendering body failures as `invalid_request`.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use user_service::inbound::http::validation::json_error_handler;
///
/// let config = web::JsonConfig::default().error_handler(json_error_handler);
/// ```
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("request body is not valid JSON: {inner}"),
        other => format!("request body could not be read: {other}"),
    };
    Error::invalid_request(message).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EMAIL_MAX, ErrorCode as DomainErrorCode, NAME_MAX, PersonName};
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(err: &'a Error, key: &str) -> Option<&'a Value> {
        err.details().and_then(|details| details.get(key))
    }

    #[rstest]
    #[case("42", 42)]
    #[case("-1", -1)]
    #[case("0", 0)]
    fn parses_integer_ids(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_user_id(raw).expect("valid id"), UserId::new(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    #[case("99999999999999999999")]
    fn rejects_non_integer_ids(#[case] raw: &str) {
        let err = parse_user_id(raw).expect_err("invalid id");

        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "code"), Some(&json!("invalid_id")));
        assert_eq!(detail(&err, "value"), Some(&json!(raw)));
    }

    #[rstest]
    fn missing_field_names_the_wire_field() {
        let err = require::<String>(None, FIRST_NAME).expect_err("missing");

        assert_eq!(err.message(), "missing required field: firstName");
        assert_eq!(detail(&err, "field"), Some(&json!("firstName")));
        assert_eq!(detail(&err, "code"), Some(&json!("missing_field")));
    }

    #[rstest]
    fn too_long_reports_maximum() {
        let long = "x".repeat(NAME_MAX + 1);
        let err = user_validation_error(PersonName::last(long).expect_err("too long"));

        assert_eq!(detail(&err, "field"), Some(&json!("lastName")));
        assert_eq!(detail(&err, "code"), Some(&json!("too_long")));
        assert_eq!(detail(&err, "max"), Some(&json!(NAME_MAX)));
    }

    #[rstest]
    #[case(UserValidationError::Blank { field: UserField::Password }, "password", "blank_field")]
    #[case(UserValidationError::InvalidEmail, "email", "invalid_email")]
    #[case(
        UserValidationError::TooLong { field: UserField::Email, max: EMAIL_MAX },
        "email",
        "too_long"
    )]
    fn validation_errors_carry_field_and_code(
        #[case] err: UserValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = user_validation_error(err);

        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some(&json!(field)));
        assert_eq!(detail(&err, "code"), Some(&json!(code)));
    }
}
