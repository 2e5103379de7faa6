//! Identity adapter that reads the creator credential attached by the host.
//!
//! The credential is either a plain actor name or a distinguished-name
//! style subject (`x509::CN=ngo-7,OU=client::CN=ca.org1`). For subjects the
//! first common name is the actor.

use crate::domain::foundation::{ActorId, CommandMetadata, DomainError, ErrorCode};
use crate::ports::IdentityProvider;

/// Resolves the actor from `CommandMetadata::creator`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatorIdentityProvider;

impl CreatorIdentityProvider {
    pub fn new() -> Self {
        Self
    }

    fn common_name(credential: &str) -> Option<&str> {
        let start = credential.find("CN=")? + 3;
        let rest = &credential[start..];
        let end = rest
            .find(|c: char| matches!(c, ',' | '/' | ':'))
            .unwrap_or(rest.len());
        Some(rest[..end].trim())
    }
}

impl IdentityProvider for CreatorIdentityProvider {
    fn current_actor(&self, metadata: &CommandMetadata) -> Result<ActorId, DomainError> {
        let unauthorized =
            || DomainError::new(ErrorCode::Unauthorized, "Error retrieving caller identity");

        let credential = metadata.creator().map(str::trim).unwrap_or_default();
        let actor = Self::common_name(credential).unwrap_or(credential);
        ActorId::new(actor).map_err(|_| unauthorized())
    }
}
