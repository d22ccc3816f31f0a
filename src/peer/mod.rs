//! Peer authorization policy types.
//!
//! A peer presenting a certificate that chains to a trusted CA is authorized when
//! [`AuthorizedPeers`] is [`AllowAll`](AuthorizedPeers::AllowAll), or when it
//! satisfies every [`RequiredCredential`] of at least one [`PeerPolicy`].

use crate::error::{Result, TlsConfigError};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub mod authorizer;
pub mod credentials;
pub mod pattern;

use credentials::PeerCredentials;
use pattern::CredentialMatchPattern;

/// The certificate field a [`RequiredCredential`] inspects.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CredentialField {
    /// The Subject Common Name.
    Cn,
    /// A DNS-typed Subject Alternative Name entry.
    SanDns,
}

impl CredentialField {
    /// All supported fields, in the order they are listed in diagnostics.
    pub const ALL: [CredentialField; 2] = [CredentialField::Cn, CredentialField::SanDns];

    /// Returns the name used for this field in the config file.
    pub fn name(&self) -> &'static str {
        match self {
            CredentialField::Cn => "CN",
            CredentialField::SanDns => "SAN_DNS",
        }
    }
}

impl Display for CredentialField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CredentialField {
    type Err = TlsConfigError;

    /// Field names are case-sensitive.
    fn from_str(name: &str) -> Result<Self> {
        CredentialField::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| TlsConfigError::UnsupportedField {
                value: name.to_string(),
            })
    }
}

/// A single requirement on a peer certificate field.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RequiredCredential {
    field: CredentialField,
    pattern: CredentialMatchPattern,
}

impl RequiredCredential {
    /// Creates a requirement that `field` matches `pattern`.
    pub fn new(field: CredentialField, pattern: impl Into<CredentialMatchPattern>) -> Self {
        Self {
            field,
            pattern: pattern.into(),
        }
    }

    /// Requires the Subject Common Name to match `pattern`.
    pub fn cn(pattern: impl Into<CredentialMatchPattern>) -> Self {
        Self::new(CredentialField::Cn, pattern)
    }

    /// Requires some DNS Subject Alternative Name to match `pattern`.
    pub fn san_dns(pattern: impl Into<CredentialMatchPattern>) -> Self {
        Self::new(CredentialField::SanDns, pattern)
    }

    /// Returns the inspected certificate field.
    pub fn field(&self) -> CredentialField {
        self.field
    }

    /// Returns the pattern the field must match.
    pub fn pattern(&self) -> &CredentialMatchPattern {
        &self.pattern
    }

    /// Returns `true` if the peer satisfies this requirement.
    ///
    /// A `CN` requirement needs a CN that matches. A `SAN_DNS` requirement needs any
    /// one of the DNS SAN entries to match.
    pub fn is_satisfied_by(&self, peer: &PeerCredentials) -> bool {
        match self.field {
            CredentialField::Cn => peer
                .common_name()
                .is_some_and(|cn| self.pattern.matches(cn)),
            CredentialField::SanDns => peer
                .dns_sans()
                .iter()
                .any(|san| self.pattern.matches(san)),
        }
    }
}

impl Display for RequiredCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RequiredCredential({} matches '{}')",
            self.field, self.pattern
        )
    }
}

/// A non-empty set of requirements, all of which a peer must satisfy.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PeerPolicy {
    required_credentials: Vec<RequiredCredential>,
}

impl PeerPolicy {
    /// Creates a policy from its requirements, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`TlsConfigError::EmptyCredentialList`] if `required_credentials` is
    /// empty, since such a policy would accept every peer.
    pub fn new(required_credentials: Vec<RequiredCredential>) -> Result<Self> {
        if required_credentials.is_empty() {
            return Err(TlsConfigError::EmptyCredentialList);
        }
        Ok(Self {
            required_credentials,
        })
    }

    /// Returns the requirements of this policy.
    pub fn required_credentials(&self) -> &[RequiredCredential] {
        &self.required_credentials
    }

    /// Returns `true` if the peer satisfies every requirement.
    pub fn is_satisfied_by(&self, peer: &PeerCredentials) -> bool {
        self.required_credentials
            .iter()
            .all(|credential| credential.is_satisfied_by(peer))
    }
}

impl Display for PeerPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("PeerPolicy(")?;
        write_list(f, &self.required_credentials)?;
        f.write_str(")")
    }
}

/// A non-empty, ordered list of [`PeerPolicy`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PeerPolicies(Vec<PeerPolicy>);

impl PeerPolicies {
    /// Creates the list, keeping the order of `policies`.
    ///
    /// # Errors
    ///
    /// Returns [`TlsConfigError::EmptyPolicyList`] if `policies` is empty.
    pub fn new(policies: Vec<PeerPolicy>) -> Result<Self> {
        if policies.is_empty() {
            return Err(TlsConfigError::EmptyPolicyList);
        }
        Ok(Self(policies))
    }

    /// Returns the policies in config order.
    pub fn as_slice(&self) -> &[PeerPolicy] {
        &self.0
    }

    /// Returns the number of policies, which is never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The set of peers allowed to connect.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum AuthorizedPeers {
    /// Any peer with a certificate that chains to a trusted CA.
    #[default]
    AllowAll,

    /// Only peers that fully satisfy at least one of the policies.
    Policies(PeerPolicies),
}

impl AuthorizedPeers {
    /// Restricts authorization to peers satisfying one of `policies`.
    ///
    /// # Errors
    ///
    /// Returns [`TlsConfigError::EmptyPolicyList`] if `policies` is empty.
    pub fn only(policies: Vec<PeerPolicy>) -> Result<Self> {
        Ok(AuthorizedPeers::Policies(PeerPolicies::new(policies)?))
    }

    /// Returns `true` if no identity policy is applied on top of certificate verification.
    pub fn allows_all_authenticated(&self) -> bool {
        matches!(self, AuthorizedPeers::AllowAll)
    }

    /// Returns the policies, or an empty slice for [`AuthorizedPeers::AllowAll`].
    pub fn policies(&self) -> &[PeerPolicy] {
        match self {
            AuthorizedPeers::AllowAll => &[],
            AuthorizedPeers::Policies(policies) => policies.as_slice(),
        }
    }

    /// Returns `true` if the peer is authorized.
    pub fn is_authorized(&self, peer: &PeerCredentials) -> bool {
        match self {
            AuthorizedPeers::AllowAll => true,
            AuthorizedPeers::Policies(policies) => policies
                .as_slice()
                .iter()
                .any(|policy| policy.is_satisfied_by(peer)),
        }
    }
}

impl Display for AuthorizedPeers {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AuthorizedPeers::AllowAll => f.write_str("AuthorizedPeers(*)"),
            AuthorizedPeers::Policies(policies) => {
                f.write_str("AuthorizedPeers(")?;
                write_list(f, policies.as_slice())?;
                f.write_str(")")
            }
        }
    }
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
