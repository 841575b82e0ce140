//! # Subsystem Wiring
//!
//! Connects the subsystems held by the container.
//!
//! ```text
//!  panel press ──→ SignalBus ──→ ListBinderService ──→ item callback
//!                      │                                    │
//!                      │                                    ↓
//!                      │                             ActionRegistry ──→ action
//!                      │
//!                      └──→ SubPageAccessController ──→ AuthenticatedEvent
//!                                                            │
//!                                     lock indicator join ←──┘
//! ```

pub mod action_menu;
pub mod actions;
pub mod counter_list;
pub mod lock;

pub use action_menu::bind_action_menu;
pub use actions::register_panel_actions;
pub use counter_list::bind_counter_list;
pub use lock::{register_lock_button, spawn_lock_indicator};
