//! Cross-subsystem integration flows.

pub mod access_flows;
pub mod bus_flows;
pub mod list_flows;
