#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

//! This library loads TLS transport security options (private key, certificate chain,
//! CA certificates and an optional peer authorization policy) from a JSON config file,
//! and decides during TLS handshakes whether a verified peer certificate is authorized.
//!
//! Loading is strict: any malformed or incomplete config is rejected as a whole with a
//! [`TlsConfigError`] whose message is stable. A config without `authorized-peers`
//! accepts every peer whose certificate chains to a trusted CA; otherwise a peer must
//! satisfy all required credentials of at least one policy.
//!
//! # Examples
//!
//! ```no_run
//! use transport_security::{read_options_from_json_file, PeerCredentials};
//!
//! # fn example(peer_cert_der: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! // read the config file and every PEM file it references
//! let options = read_options_from_json_file("/etc/tls/config.json")?;
//!
//! // hand the PEM material to the TLS library
//! let _key = options.private_key_pem();
//! let _chain = options.cert_chain_pem();
//! let _ca = options.ca_certs_pem();
//!
//! // once the peer certificate chain is verified, apply the identity policy
//! let peer = PeerCredentials::from_der(peer_cert_der)?;
//! if !options.is_authorized(&peer) {
//!     return Err("peer is not authorized".into());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod options;
pub mod peer;

mod observability;
mod prelude;

pub use config::source::{get_default_config_path, FileSource, LocalFileSource};
pub use config::TransportSecurityConfig;
pub use error::{Result, TlsConfigError};
pub use options::reading::{
    read_options_from_env, read_options_from_json_file, read_options_from_json_file_with,
    read_options_from_json_string, read_options_from_json_string_with,
};
pub use options::{is_authorized, TransportSecurityOptions, TransportSecurityOptionsBuilder};
pub use peer::authorizer::Authorizer;
pub use peer::credentials::PeerCredentials;
pub use peer::pattern::CredentialMatchPattern;
pub use peer::{AuthorizedPeers, CredentialField, PeerPolicies, PeerPolicy, RequiredCredential};
