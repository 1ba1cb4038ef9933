//! Tracking session management module
//!
//! This module contains:
//! - Session state owning sources, targets, the traced region and places
//! - Input message types consumed by the session

pub mod messages;
pub mod state;

pub use messages::InputMsg;
pub use state::Session;
