//! Domain module for PIN Authentication
//!
//! Contains credential records, the validated credential table and errors.

pub mod entities;
pub mod errors;
pub mod table;

pub use entities::*;
pub use errors::*;
pub use table::{is_well_formed_pin, CredentialTable};
