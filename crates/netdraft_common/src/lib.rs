//! Netdraft Common - Shared types and design logic for Netdraft.
//!
//! Holds everything both the daemon and the CLI need: the device catalog,
//! the requirements model, the topology generator with its report builders,
//! the conversation stage tracker, and the diagram/table exporters.

pub mod catalog;
pub mod config;
pub mod conversation;
pub mod error;
pub mod export;
pub mod graph;
pub mod layout;
pub mod render;
pub mod reports;
pub mod requirements;
pub mod rpc;
pub mod topology;

pub use catalog::{device, DeviceInfo, DeviceKind};
pub use conversation::{ConversationContext, Stage};
pub use error::NetdraftError;
pub use graph::{Edge, NetworkGraph, Node, NodeKind};
pub use reports::NetworkOutput;
pub use requirements::{BusinessProfile, Department, NetworkRequirements, NetworkType};
pub use topology::generate_design;
