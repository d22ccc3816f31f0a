//! Loaded TLS material and peer authorization policy.

use crate::peer::authorizer::Authorizer;
use crate::peer::credentials::PeerCredentials;
use crate::peer::AuthorizedPeers;
use std::fmt;
use std::fmt::{Debug, Formatter};
use zeroize::{Zeroize, ZeroizeOnDrop};

pub mod reading;

/// PEM text of a private key. The text is zeroized on drop.
#[derive(Clone, Default, Eq, PartialEq, Zeroize, ZeroizeOnDrop)]
struct PrivateKeyPem(String);

/// TLS options consumed by the handshake layer: private key, certificate chain and
/// CA certificates as PEM text, plus the peer authorization policy.
///
/// The PEM text is kept exactly as read from disk; it is not validated here.
/// Options are immutable once built. To reload, build a new value and swap it in
/// for new handshakes (e.g. behind an `Arc`).
#[derive(Clone, Default, Eq, PartialEq)]
pub struct TransportSecurityOptions {
    private_key_pem: PrivateKeyPem,
    cert_chain_pem: String,
    ca_certs_pem: String,
    authorized_peers: AuthorizedPeers,
    accepted_ciphers: Vec<String>,
    disable_hostname_validation: bool,
}

impl TransportSecurityOptions {
    /// Returns a builder for options assembled in code rather than read from a file.
    ///
    /// # Examples
    ///
    /// ```
    /// use transport_security::{PeerCredentials, TransportSecurityOptions};
    ///
    /// let options = TransportSecurityOptions::builder()
    ///     .private_key_pem("My private key\n")
    ///     .cert_chain_pem("My certificate chain\n")
    ///     .ca_certs_pem("My CA certificates\n")
    ///     .build();
    ///
    /// assert!(options.authorized_peers().allows_all_authenticated());
    /// assert!(options.is_authorized(&PeerCredentials::default()));
    /// ```
    pub fn builder() -> TransportSecurityOptionsBuilder {
        TransportSecurityOptionsBuilder::default()
    }

    /// Returns the PEM private key.
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem.0
    }

    /// Returns the PEM certificate chain.
    pub fn cert_chain_pem(&self) -> &str {
        &self.cert_chain_pem
    }

    /// Returns the PEM CA certificates.
    pub fn ca_certs_pem(&self) -> &str {
        &self.ca_certs_pem
    }

    /// Returns the peer authorization policy.
    pub fn authorized_peers(&self) -> &AuthorizedPeers {
        &self.authorized_peers
    }

    /// Returns the accepted cipher suite names; empty means the TLS library default.
    pub fn accepted_ciphers(&self) -> &[String] {
        &self.accepted_ciphers
    }

    /// Returns `true` if peer hostname validation should be skipped.
    pub fn disable_hostname_validation(&self) -> bool {
        self.disable_hostname_validation
    }

    /// Returns `true` if a peer whose certificate chain was already verified may connect.
    pub fn is_authorized(&self, peer: &PeerCredentials) -> bool {
        self.authorized_peers.is_authorized(peer)
    }
}

impl Debug for TransportSecurityOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportSecurityOptions")
            .field("private_key_pem", &"<redacted>")
            .field("cert_chain_pem", &self.cert_chain_pem)
            .field("ca_certs_pem", &self.ca_certs_pem)
            .field("authorized_peers", &self.authorized_peers)
            .field("accepted_ciphers", &self.accepted_ciphers)
            .field(
                "disable_hostname_validation",
                &self.disable_hostname_validation,
            )
            .finish()
    }
}

impl Authorizer for TransportSecurityOptions {
    fn authorize(&self, peer: &PeerCredentials) -> bool {
        self.is_authorized(peer)
    }
}

/// Decides whether the peer is authorized by `options`.
///
/// Certificate chain verification is assumed to have happened already in the TLS
/// layer; this only applies the identity policy.
pub fn is_authorized(options: &TransportSecurityOptions, peer: &PeerCredentials) -> bool {
    options.is_authorized(peer)
}

/// Builder for [`TransportSecurityOptions`].
#[derive(Default)]
pub struct TransportSecurityOptionsBuilder {
    options: TransportSecurityOptions,
}

impl Debug for TransportSecurityOptionsBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportSecurityOptionsBuilder")
            .field("options", &self.options)
            .finish()
    }
}

impl TransportSecurityOptionsBuilder {
    /// Sets the PEM private key.
    pub fn private_key_pem(mut self, pem: impl Into<String>) -> Self {
        self.options.private_key_pem = PrivateKeyPem(pem.into());
        self
    }

    /// Sets the PEM certificate chain.
    pub fn cert_chain_pem(mut self, pem: impl Into<String>) -> Self {
        self.options.cert_chain_pem = pem.into();
        self
    }

    /// Sets the PEM CA certificates.
    pub fn ca_certs_pem(mut self, pem: impl Into<String>) -> Self {
        self.options.ca_certs_pem = pem.into();
        self
    }

    /// Sets the peer authorization policy. Defaults to [`AuthorizedPeers::AllowAll`].
    pub fn authorized_peers(mut self, authorized_peers: AuthorizedPeers) -> Self {
        self.options.authorized_peers = authorized_peers;
        self
    }

    /// Sets the accepted cipher suite names.
    pub fn accepted_ciphers<I, S>(mut self, ciphers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.accepted_ciphers = ciphers.into_iter().map(Into::into).collect();
        self
    }

    /// Disables peer hostname validation.
    pub fn disable_hostname_validation(mut self, disable: bool) -> Self {
        self.options.disable_hostname_validation = disable;
        self
    }

    /// Builds the options.
    pub fn build(self) -> TransportSecurityOptions {
        self.options
    }
}
