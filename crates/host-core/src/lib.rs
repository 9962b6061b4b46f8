//! Floatview host-environment contracts.
//!
//! This crate contains the capability traits and stream data structures the
//! viewer core drives, without coupling to a concrete host backend:
//!
//! - **Display capture:** request a live video stream of screen/window content
//! - **Playback surface:** the sink a stream is bound to, with a one-shot
//!   metadata-ready latch and the floating-viewer transition
//! - **Trigger control:** the enabled/disabled user input that requests the
//!   floating viewer

pub mod capture;
pub mod surface;
pub mod trigger;

pub use capture::*;
pub use surface::*;
pub use trigger::*;
