//! Invocation surface of the ledger.
//!
//! Turns `(function, positional args)` pairs into typed commands and routes
//! them to the application handlers.

mod arguments;
mod chaincode;
mod decode;
mod operation;

pub use arguments::Arguments;
pub use chaincode::{Chaincode, InvocationOutput};
pub use operation::Operation;
