//! Floatview Linux platform integration.
//!
//! On modern Linux (Wayland), display capture must go through the XDG
//! Desktop Portal, which provides a user-consented, sandboxed way to access
//! screen content. This crate implements the `DisplayCapture` capability on
//! top of it.

pub mod portal;

pub use portal::{is_portal_available, PortalDisplayCapture};
