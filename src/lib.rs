//! Touchstick
//!
//! Virtual joystick and touchpad controls built with Rust, winit, and glam.

/// Camera and the screen-to-world projection seam
pub mod camera;

/// Layered configuration for controls and the preview window
pub mod config;

/// On-screen controls - capture, state machines, axis output
pub mod controls;

/// Touch input collection - snapshots and pointer emulation
pub mod input;
