//! Floatview Viewer Core
//!
//! The capture session controller: acquires a live display stream, binds it
//! to a playback surface, and mediates floating-viewer (picture-in-picture)
//! toggling.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              CaptureController                │
//! │                                               │
//! │  acquire (once) ──► DisplayCapture            │
//! │        │                                      │
//! │        ▼  bind / metadata / play              │
//! │  PlaybackSurface ◄── toggle ◄── TriggerControl│
//! │                      (disable while in flight)│
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Acquisition and trigger handling are independent: a pending capture
//! request never blocks a floating-viewer request, and vice versa.

pub mod session;

pub use session::*;
