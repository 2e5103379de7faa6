//! Identity adapters.
//!
//! Implementations of the `IdentityProvider` port:
//!
//! - `creator` - Reads the credential the host attaches to each invocation

mod creator;

pub use creator::CreatorIdentityProvider;
