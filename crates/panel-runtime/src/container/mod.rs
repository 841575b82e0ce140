//! # Panel Container
//!
//! Owns every subsystem instance for one panel and hands out `Arc`s.
//!
//! - Subsystems are built once, in dependency order
//! - Nothing is reachable through statics; tests build as many containers
//!   as they need

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, RuntimeConfig};
pub use subsystems::{ContainerError, PanelContainer};
