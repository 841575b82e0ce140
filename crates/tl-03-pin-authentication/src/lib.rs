//! # TL-03 PIN Authentication
//!
//! Validates PINs entered on the panel keypad and reports the access level
//! they grant.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Credentials
//!
//! A credential maps a fixed-length digit PIN to an `AuthorizationLevel`
//! above `None` and a display label. Credentials are loaded once at
//! startup through the [`CredentialStore`] port and only change on
//! [`AuthenticationApi::reload`].
//!
//! | Startup result | Meaning | Recovery |
//! |----------------|---------|----------|
//! | `ConfigNotFound` | nothing stored | `create_default_config()` |
//! | `ConfigCorrupt` | unreadable, malformed or duplicate records | none; no PIN is accepted |
//! | `Storage` | store I/O failed | retry |
//!
//! ## Lookup
//!
//! `authorize_pin` is an exact match on the full PIN, compared in constant
//! time against every entry. A miss yields `(None, "")`.
//!
//! ## Module Structure
//!
//! ```text
//! tl-03-pin-authentication/
//! ├── domain/      # CredentialRecord, CredentialTable, AuthOutcome, errors
//! ├── ports/       # AuthenticationApi (inbound), CredentialStore (outbound)
//! ├── adapters/    # JSON file and in-memory stores
//! ├── config.rs    # AuthConfig
//! └── service.rs   # PinAuthenticationProvider
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryCredentialStore, JsonFileCredentialStore};
pub use config::{AuthConfig, DEFAULT_PIN_LENGTH};
pub use domain::{
    is_well_formed_pin, AuthError, AuthOutcome, CredentialRecord, CredentialTable, StoreError,
};
pub use ports::{AuthenticationApi, CredentialStore};
pub use service::PinAuthenticationProvider;
