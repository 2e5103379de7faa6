//! Identity Provider Port - Resolves the caller of an invocation.
//!
//! The hosting ledger attaches the submitter's credential to every
//! invocation. How the credential maps to an actor is opaque to the ledger
//! core; handlers only ever see the resolved `ActorId`.

use crate::domain::foundation::{ActorId, CommandMetadata, DomainError};

/// Port for resolving the acting identity.
pub trait IdentityProvider: Send + Sync {
    /// Returns the actor that submitted the invocation.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if the invocation carries no usable credential.
    fn current_actor(&self, metadata: &CommandMetadata) -> Result<ActorId, DomainError>;
}
