//! Domain module for the Action Registry
//!
//! Contains the registered action entity, the overload resolution rule and
//! errors.

pub mod entities;
pub mod errors;
pub mod resolution;

pub use entities::*;
pub use errors::*;
pub use resolution::resolve;
