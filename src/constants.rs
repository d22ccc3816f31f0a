//! Well-known names used by the TLS config file format.

/// Name of the environment variable that may hold the path of the TLS config file.
pub const TLS_CONFIG_FILE_ENV: &str = "TLS_CONFIG_FILE";

pub(crate) const FILES_KEY: &str = "files";
pub(crate) const PRIVATE_KEY_KEY: &str = "private-key";
pub(crate) const CERTIFICATES_KEY: &str = "certificates";
pub(crate) const CA_CERTIFICATES_KEY: &str = "ca-certificates";

pub(crate) const AUTHORIZED_PEERS_KEY: &str = "authorized-peers";
pub(crate) const REQUIRED_CREDENTIALS_KEY: &str = "required-credentials";
pub(crate) const FIELD_KEY: &str = "field";
pub(crate) const MUST_MATCH_KEY: &str = "must-match";

pub(crate) const ACCEPTED_CIPHERS_KEY: &str = "accepted-ciphers";
pub(crate) const DISABLE_HOSTNAME_VALIDATION_KEY: &str = "disable-hostname-validation";
