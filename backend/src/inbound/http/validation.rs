//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{Error, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidDate,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidDate => "invalid_date",
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

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const FIRSTNAME: FieldName = FieldName::new("firstname");
pub(crate) const LASTNAME: FieldName = FieldName::new("lastname");
pub(crate) const DATE_OF_BIRTH: FieldName = FieldName::new("date_of_birth");
pub(crate) const ID: FieldName = FieldName::new("id");

/// Report every missing required field at once.
pub(crate) fn missing_fields_error(fields: &[FieldName]) -> Error {
    let names: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
    Error::invalid_request("username, firstname, and lastname are required").with_details(json!({
        "fields": names,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

fn invalid_value(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse an optional `YYYY-MM-DD` date. Empty text means absent.
pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    match value.filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                invalid_value(
                    field,
                    format!("{} must be a date in YYYY-MM-DD form", field.as_str()),
                    ErrorCode::InvalidDate,
                    raw,
                )
            }),
    }
}

/// Parse a path segment into a [`UserId`].
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<i64>()
        .ok()
        .and_then(|value| UserId::new(value).ok())
        .ok_or_else(|| {
            invalid_value(
                ID,
                "id must be a positive integer".to_owned(),
                ErrorCode::InvalidId,
                raw,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("9007199254740993", 9_007_199_254_740_993)]
    fn parse_user_id_accepts_positive_integers(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_user_id(raw).map(UserId::get), Ok(expected));
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    fn parse_user_id_rejects_other_text(#[case] raw: &str) {
        let error = parse_user_id(raw).expect_err("invalid id");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "id", "value": raw, "code": "invalid_id" }))
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("1990-02-28"), NaiveDate::from_ymd_opt(1990, 2, 28))]
    fn parse_optional_date_accepts_iso_dates(
        #[case] raw: Option<&str>,
        #[case] expected: Option<NaiveDate>,
    ) {
        assert_eq!(parse_optional_date(raw, DATE_OF_BIRTH), Ok(expected));
    }

    #[rstest]
    #[case("1990-02-30")]
    #[case("28/02/1990")]
    #[case("1990-02-28T00:00:00Z")]
    fn parse_optional_date_rejects_other_forms(#[case] raw: &str) {
        let error = parse_optional_date(Some(raw), DATE_OF_BIRTH).expect_err("invalid date");
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "date_of_birth", "value": raw, "code": "invalid_date" }))
        );
    }

    #[rstest]
    fn missing_fields_are_listed() {
        let error = missing_fields_error(&[USERNAME, LASTNAME]);
        assert_eq!(error.message(), "username, firstname, and lastname are required");
        assert_eq!(
            error.details(),
            Some(&json!({ "fields": ["username", "lastname"], "code": "missing_field" }))
        );
    }
}
