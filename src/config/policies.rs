//! Compiles the `authorized-peers` section into [`AuthorizedPeers`].

use crate::constants::{FIELD_KEY, MUST_MATCH_KEY, REQUIRED_CREDENTIALS_KEY};
use crate::error::{Result, TlsConfigError};
use crate::peer::{AuthorizedPeers, CredentialField, PeerPolicy, RequiredCredential};
use crate::prelude::info;
use serde_json::Value;

/// Compiles the value of a present `authorized-peers` key.
///
/// Policies and their credentials keep their config order. Anything that is not a
/// non-empty array of policies is rejected with [`TlsConfigError::EmptyPolicyList`],
/// and a policy without a non-empty `required-credentials` array with
/// [`TlsConfigError::EmptyCredentialList`].
pub(crate) fn compile_authorized_peers(value: &Value) -> Result<AuthorizedPeers> {
    let entries = match value.as_array() {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Err(TlsConfigError::EmptyPolicyList),
    };

    let policies = entries
        .iter()
        .map(compile_policy)
        .collect::<Result<Vec<_>>>()?;

    info!("Compiled {} authorized peer policies", policies.len());
    AuthorizedPeers::only(policies)
}

fn compile_policy(value: &Value) -> Result<PeerPolicy> {
    let credentials = value
        .get(REQUIRED_CREDENTIALS_KEY)
        .and_then(Value::as_array)
        .ok_or(TlsConfigError::EmptyCredentialList)?;

    let required = credentials
        .iter()
        .map(compile_credential)
        .collect::<Result<Vec<_>>>()?;

    PeerPolicy::new(required)
}

fn compile_credential(value: &Value) -> Result<RequiredCredential> {
    let field = match value.get(FIELD_KEY) {
        Some(Value::String(name)) => name.parse::<CredentialField>()?,
        Some(other) => {
            return Err(TlsConfigError::UnsupportedField {
                value: other.to_string(),
            })
        }
        None => {
            return Err(TlsConfigError::UnsupportedField {
                value: String::new(),
            })
        }
    };

    let pattern = value
        .get(MUST_MATCH_KEY)
        .and_then(Value::as_str)
        .ok_or(TlsConfigError::MissingMatchPattern { field })?;

    Ok(RequiredCredential::new(field, pattern))
}
