use regex::Regex;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("DNS name is empty")]
    Empty,
    #[error("DNS name too long (max 253 characters)")]
    TooLong,
    #[error("DNS label '{0}' is empty or longer than 63 characters")]
    BadLabelLength(String),
    #[error("DNS label '{0}' contains invalid characters")]
    InvalidCharacters(String),
    #[error("record type is empty")]
    EmptyRecordType,
}

lazy_static::lazy_static! {
    /// Letters, digits, '-', '_' (for TXT ownership and ACME labels) and a
    /// leading wildcard label.
    static ref LABEL_RE: Regex = Regex::new(r"^(\*|[A-Za-z0-9_]([A-Za-z0-9_-]*[A-Za-z0-9_])?)$").unwrap();
}

/// Check a fully-qualified name as received from the orchestrator. A single
/// trailing dot is accepted.
pub fn validate_dns_name(name: &str) -> Result<(), ValidationError> {
    let d = name.strip_suffix('.').unwrap_or(name);
    if d.is_empty() {
        return Err(ValidationError::Empty);
    }
    if d.len() > 253 {
        return Err(ValidationError::TooLong);
    }
    for label in d.split('.') {
        if label.is_empty() || label.len() > 63 {
            return Err(ValidationError::BadLabelLength(label.to_string()));
        }
        if !LABEL_RE.is_match(label) {
            return Err(ValidationError::InvalidCharacters(label.to_string()));
        }
    }
    Ok(())
}

pub fn validate_record_type(rrtype: &str) -> Result<(), ValidationError> {
    if rrtype.trim().is_empty() {
        return Err(ValidationError::EmptyRecordType);
    }
    Ok(())
}
