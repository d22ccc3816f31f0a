//! TLS config file schema and its validation.
//!
//! The config file is a JSON document of the form:
//!
//! ```json
//! {
//!   "files": {
//!     "private-key": "/path/to/key.pem",
//!     "certificates": "/path/to/chain.pem",
//!     "ca-certificates": "/path/to/ca.pem"
//!   },
//!   "authorized-peers": [
//!     {
//!       "required-credentials": [
//!         {"field": "SAN_DNS", "must-match": "*.example.com"}
//!       ]
//!     }
//!   ],
//!   "accepted-ciphers": ["TLS13_AES_256_GCM_SHA384"],
//!   "disable-hostname-validation": false
//! }
//! ```
//!
//! Only `files` is mandatory. Unknown keys are ignored.

use crate::constants::{
    ACCEPTED_CIPHERS_KEY, AUTHORIZED_PEERS_KEY, CA_CERTIFICATES_KEY, CERTIFICATES_KEY,
    DISABLE_HOSTNAME_VALIDATION_KEY, FILES_KEY, PRIVATE_KEY_KEY,
};
use crate::error::{Result, TlsConfigError};
use crate::peer::AuthorizedPeers;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub(crate) mod policies;
pub mod source;

use policies::compile_authorized_peers;

/// A structurally validated TLS config, before the files it names have been read.
///
/// The optional sections (`authorized-peers`, `accepted-ciphers`,
/// `disable-hostname-validation`) are kept as written and compiled only once the
/// referenced files have been read, so a missing file is always reported first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransportSecurityConfig {
    private_key_path: PathBuf,
    certificate_path: PathBuf,
    ca_certificates_path: PathBuf,
    authorized_peers: Option<Value>,
    accepted_ciphers: Option<Value>,
    disable_hostname_validation: Option<Value>,
}

impl TransportSecurityConfig {
    /// Parses config text and validates its `files` section. Does not touch the
    /// filesystem.
    ///
    /// Validation stops at the first violation, checked in this order: JSON syntax,
    /// the `files` object, `private-key`, `certificates`, `ca-certificates`.
    ///
    /// # Errors
    ///
    /// Returns the [`TlsConfigError`] describing the first violation.
    pub fn parse(json_text: &str) -> Result<Self> {
        let mut root: Value =
            serde_json::from_str(json_text).map_err(TlsConfigError::InvalidJson)?;

        let files = root
            .get(FILES_KEY)
            .and_then(Value::as_object)
            .filter(|files| !files.is_empty())
            .ok_or(TlsConfigError::MissingFilesSection)?;

        let private_key_path = required_path(files, PRIVATE_KEY_KEY)?;
        let certificate_path = required_path(files, CERTIFICATES_KEY)?;
        let ca_certificates_path = required_path(files, CA_CERTIFICATES_KEY)?;

        // `files` being present means the root is an object
        let mut take = |key: &str| root.as_object_mut().and_then(|root| root.remove(key));

        Ok(Self {
            private_key_path,
            certificate_path,
            ca_certificates_path,
            authorized_peers: take(AUTHORIZED_PEERS_KEY),
            accepted_ciphers: take(ACCEPTED_CIPHERS_KEY),
            disable_hostname_validation: take(DISABLE_HOSTNAME_VALIDATION_KEY),
        })
    }

    /// Returns the path of the PEM private key.
    pub fn private_key_path(&self) -> &Path {
        &self.private_key_path
    }

    /// Returns the path of the PEM certificate chain.
    pub fn certificate_path(&self) -> &Path {
        &self.certificate_path
    }

    /// Returns the path of the PEM CA certificates.
    pub fn ca_certificates_path(&self) -> &Path {
        &self.ca_certificates_path
    }

    /// Compiles the peer authorization policy; [`AuthorizedPeers::AllowAll`] when
    /// `authorized-peers` is absent.
    ///
    /// # Errors
    ///
    /// Returns the first policy violation, see [`TlsConfigError::EmptyPolicyList`],
    /// [`TlsConfigError::EmptyCredentialList`], [`TlsConfigError::UnsupportedField`]
    /// and [`TlsConfigError::MissingMatchPattern`].
    pub fn authorized_peers(&self) -> Result<AuthorizedPeers> {
        match &self.authorized_peers {
            Some(peers) => compile_authorized_peers(peers),
            None => Ok(AuthorizedPeers::AllowAll),
        }
    }

    /// Returns the accepted cipher suite names; empty means the TLS library default.
    ///
    /// # Errors
    ///
    /// Returns [`TlsConfigError::InvalidAcceptedCiphers`] if the value is not an array
    /// of strings.
    pub fn accepted_ciphers(&self) -> Result<Vec<String>> {
        match &self.accepted_ciphers {
            Some(ciphers) => parse_ciphers(ciphers),
            None => Ok(Vec::new()),
        }
    }

    /// Returns `true` if peer hostname validation should be skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TlsConfigError::InvalidHostnameValidationFlag`] if the value is not a
    /// boolean.
    pub fn disable_hostname_validation(&self) -> Result<bool> {
        match &self.disable_hostname_validation {
            Some(flag) => flag
                .as_bool()
                .ok_or(TlsConfigError::InvalidHostnameValidationFlag),
            None => Ok(false),
        }
    }
}

fn required_path(files: &Map<String, Value>, name: &'static str) -> Result<PathBuf> {
    match files.get(name).and_then(Value::as_str) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Err(TlsConfigError::MissingField { name }),
    }
}

fn parse_ciphers(value: &Value) -> Result<Vec<String>> {
    value
        .as_array()
        .ok_or(TlsConfigError::InvalidAcceptedCiphers)?
        .iter()
        .map(|cipher| {
            cipher
                .as_str()
                .map(str::to_owned)
                .ok_or(TlsConfigError::InvalidAcceptedCiphers)
        })
        .collect()
}
