//! Touch input collection
//!
//! Normalizes platform input into a per-tick touch snapshot:
//! - Tracks native touches across frames by identity, not index
//! - Synthesizes a pointer-emulated touch from mouse input for desktop use
//! - Produces one read-only snapshot per frame, shared by all controls
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → TouchCollector → TouchSnapshot
//!                                          ↓
//!                                     ControlSet
//!                                 (capture + tweaking)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // In window_event()
//! collector.handle_window_event(&event);
//!
//! // Each frame, before ticking the controls
//! let snapshot = collector.snapshot();
//! control_set.tick(&snapshot, &camera);
//! collector.advance_frame();
//! ```

mod collector;
mod touch;

// Re-export public API
pub use collector::TouchCollector;
pub use touch::{Touch, TouchId, TouchOrigin, TouchPhase, TouchSnapshot};
