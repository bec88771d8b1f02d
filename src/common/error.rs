use snafu::prelude::*;

/// Why a single record was rejected by [`crate::translate::to_provider_format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    MissingField(&'static str),
    UnknownRecordType,
    MissingMxPref,
    InvalidTtl,
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::MissingField(field) => write!(f, "missing field {field}"),
            ValidationFailure::UnknownRecordType => f.write_str("unknown record type"),
            ValidationFailure::MissingMxPref => f.write_str("missing or non-integer MXPref"),
            ValidationFailure::InvalidTtl => f.write_str("TTL must be an integer between 60 and 60000"),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{method} {url} failed: {source}"))]
    TransportError {
        url: String,
        method: String,
        source: ureq::Error,
    },
    #[snafu(display("Provider rejected {command}: {message}"))]
    ProviderError { command: String, message: String },
    #[snafu(display("{message}: {source}"))]
    ResponseError {
        message: String,
        source: Box<dyn std::error::Error>,
    },
    #[snafu(display("Record {index} ({host_name} {record_type}) is invalid: {reason}"))]
    ValidationError {
        index: usize,
        host_name: String,
        record_type: String,
        reason: ValidationFailure,
    },
    #[snafu(display("{message}: {source}"))]
    FileFormatError {
        message: String,
        source: serde_yaml::Error,
    },
    #[snafu(display("{message}: {source}"))]
    FileError {
        message: String,
        source: std::io::Error,
    },
    #[snafu(display("Invalid configuration ({prefix}): {message}"))]
    ConfigError { message: String, prefix: String },
    #[snafu(display("Domain {domain} must be of the form <sld>.<tld>"))]
    InvalidDomain { domain: String },
}

pub type Result<T> = std::result::Result<T, Error>;
