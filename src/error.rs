//! Error type for loading TLS transport security options.
//!
//! The `Display` text of every variant is stable: callers and tooling match on it.

use crate::peer::CredentialField;
use std::io;
use thiserror::Error;

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, TlsConfigError>;

/// An error that may arise loading or validating a TLS config file.
///
/// Every variant is fatal to the loading attempt: no partially populated
/// [`TransportSecurityOptions`](crate::TransportSecurityOptions) is ever returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TlsConfigError {
    /// The TLS config file itself could not be read.
    #[error("TLS config file '{path}' could not be read")]
    ConfigFileUnreadable {
        /// Path of the config file, as given by the caller.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The config text is not syntactically valid JSON.
    #[error("Provided TLS config file is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// The root `files` object is absent, not an object, or empty.
    #[error("TLS config root field 'files' is missing or empty")]
    MissingFilesSection,

    /// One of the mandatory entries of `files` is absent, not a string, or empty.
    #[error("TLS config field '{name}' has not been set")]
    MissingField {
        /// The JSON key of the missing entry.
        name: &'static str,
    },

    /// A file named in the `files` object could not be read.
    #[error("File '{path}' referenced by TLS config does not exist")]
    ReferencedFileMissing {
        /// Path of the referenced file, as written in the config.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// `authorized-peers` is present but holds no policies.
    #[error(
        "\"authorized-peers\" must either be not present (allows all peers with valid \
         certificates) or a non-empty array"
    )]
    EmptyPolicyList,

    /// A peer policy has no required credentials.
    #[error("\"required-credentials\" array can't be empty (would allow all peers)")]
    EmptyCredentialList,

    /// A required credential names a certificate field that is not supported.
    #[error("Unsupported credential field type: '{value}'. Supported are: CN, SAN_DNS")]
    UnsupportedField {
        /// The offending `field` value.
        value: String,
    },

    /// A required credential has no string `must-match` pattern.
    #[error("\"must-match\" pattern for credential field '{field}' has not been set")]
    MissingMatchPattern {
        /// The field the credential applies to.
        field: CredentialField,
    },

    /// `accepted-ciphers` is present but is not an array of strings.
    #[error("\"accepted-ciphers\" must be an array of cipher suite name strings")]
    InvalidAcceptedCiphers,

    /// `disable-hostname-validation` is present but is not a boolean.
    #[error("\"disable-hostname-validation\" must be a boolean")]
    InvalidHostnameValidationFlag,

    /// A peer certificate handed to [`PeerCredentials::from_der`](crate::PeerCredentials::from_der)
    /// could not be parsed.
    #[error("failed parsing peer certificate: {0}")]
    InvalidPeerCertificate(String),
}
