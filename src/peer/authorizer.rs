//! Authorization hook consulted once per handshake.

use crate::peer::credentials::PeerCredentials;
use crate::peer::AuthorizedPeers;
use std::sync::Arc;

/// Decides whether a peer may connect, given the identity fields of its certificate.
///
/// Authorization runs **after** the certificate chain has been verified against the
/// configured CA certificates. Implementations must be thread-safe and must not fail:
/// every input yields a decision.
pub trait Authorizer: Send + Sync + 'static {
    /// Returns `true` if the peer is authorized.
    fn authorize(&self, peer: &PeerCredentials) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(&PeerCredentials) -> bool + Send + Sync + 'static,
{
    fn authorize(&self, peer: &PeerCredentials) -> bool {
        self(peer)
    }
}

impl Authorizer for Arc<dyn Authorizer> {
    fn authorize(&self, peer: &PeerCredentials) -> bool {
        (**self).authorize(peer)
    }
}

impl Authorizer for Box<dyn Authorizer> {
    fn authorize(&self, peer: &PeerCredentials) -> bool {
        (**self).authorize(peer)
    }
}

impl Authorizer for AuthorizedPeers {
    fn authorize(&self, peer: &PeerCredentials) -> bool {
        self.is_authorized(peer)
    }
}
