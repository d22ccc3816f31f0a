//! Identity fields of a peer certificate.

use crate::error::{Result, TlsConfigError};
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::GeneralName;
use x509_parser::prelude::FromDer;

/// The fields of a verified peer certificate that authorization policies inspect.
///
/// The TLS layer builds this after the certificate chain has been verified, either
/// directly with [`PeerCredentials::new`] or from the leaf certificate with
/// [`PeerCredentials::from_der`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PeerCredentials {
    common_name: Option<String>,
    dns_sans: Vec<String>,
}

impl PeerCredentials {
    /// Creates the credentials from already extracted fields.
    pub fn new<I>(common_name: Option<String>, dns_sans: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            common_name,
            dns_sans: dns_sans.into_iter().collect(),
        }
    }

    /// Extracts the Subject CN and the DNS SAN entries of a DER-encoded certificate.
    ///
    /// Only the first CN attribute of the subject is used. A certificate without a
    /// Subject Alternative Name extension yields no DNS SAN entries.
    ///
    /// # Errors
    ///
    /// Returns [`TlsConfigError::InvalidPeerCertificate`] if the bytes are not a
    /// parseable X.509 certificate, or if its SAN extension is malformed.
    pub fn from_der(der_bytes: &[u8]) -> Result<Self> {
        let (_, cert) = X509Certificate::from_der(der_bytes)
            .map_err(|e| TlsConfigError::InvalidPeerCertificate(e.to_string()))?;

        let common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|attr| attr.as_str().ok())
            .map(str::to_owned);

        let san = cert
            .subject_alternative_name()
            .map_err(|e| TlsConfigError::InvalidPeerCertificate(e.to_string()))?;

        let mut dns_sans = Vec::new();
        if let Some(san) = san {
            for name in &san.value.general_names {
                if let GeneralName::DNSName(dns) = name {
                    dns_sans.push((*dns).to_owned());
                }
            }
        }

        Ok(Self {
            common_name,
            dns_sans,
        })
    }

    /// Returns the Subject Common Name, if the certificate has one.
    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    /// Returns the DNS Subject Alternative Name entries in certificate order.
    pub fn dns_sans(&self) -> &[String] {
        &self.dns_sans
    }
}
