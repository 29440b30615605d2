//! Touch collection from winit events

use glam::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase as WinitTouchPhase, WindowEvent};

use super::touch::{Touch, TouchId, TouchOrigin, TouchPhase, TouchSnapshot};

/// Left-button press state with edge detection, used for pointer emulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            state => state,
        }
    }
}

/// A platform touch tracked across frames by identity
#[derive(Debug, Clone, Copy)]
struct TrackedTouch {
    id: u64,
    position: Vec2,
    phase: TouchPhase,
}

/// Collects raw input and produces one [`TouchSnapshot`] per frame
///
/// Native touches are tracked by identity in arrival order. When pointer
/// emulation is enabled, left-mouse input is surfaced as a synthetic touch
/// with the reserved identity [`TouchId::POINTER`], so desktop previews can
/// drive touch controls without a touchscreen. The synthetic touch is
/// suppressed whenever a native touch occupies the reserved identity.
///
/// Hosts running on winit feed [`TouchCollector::handle_window_event`];
/// other hosts can call the touch and pointer methods directly.
pub struct TouchCollector {
    touches: Vec<TrackedTouch>,
    cursor: Option<Vec2>,
    button: ButtonState,
    pointer_emulation: bool,
}

impl TouchCollector {
    /// Creates a collector with pointer emulation enabled
    pub fn new() -> Self {
        Self {
            touches: Vec::new(),
            cursor: None,
            button: ButtonState::Released,
            pointer_emulation: true,
        }
    }

    /// Enables or disables mouse-to-touch emulation
    ///
    /// Turn this off in environments with native multitouch.
    pub fn set_pointer_emulation(&mut self, enabled: bool) {
        self.pointer_emulation = enabled;
    }

    pub fn pointer_emulation(&self) -> bool {
        self.pointer_emulation
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Touch(touch) => {
                let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    WinitTouchPhase::Started => self.touch_began(touch.id, position),
                    WinitTouchPhase::Moved => self.touch_moved(touch.id, position),
                    WinitTouchPhase::Ended | WinitTouchPhase::Cancelled => {
                        self.touch_ended(touch.id, position);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    self.set_button_pressed(*state == ElementState::Pressed);
                }
            }

            _ => {}
        }
    }

    /// Records a new platform touch
    pub fn touch_began(&mut self, id: u64, position: Vec2) {
        // Re-used identities replace any stale entry
        self.touches.retain(|t| t.id != id);
        self.touches.push(TrackedTouch {
            id,
            position,
            phase: TouchPhase::Began,
        });
    }

    /// Updates the position of a tracked touch
    pub fn touch_moved(&mut self, id: u64, position: Vec2) {
        if let Some(tracked) = self.touches.iter_mut().find(|t| t.id == id) {
            tracked.position = position;
            // A touch that began this frame stays Began until observed
            if tracked.phase != TouchPhase::Began {
                tracked.phase = TouchPhase::Moved;
            }
        }
    }

    /// Marks a tracked touch as ended
    pub fn touch_ended(&mut self, id: u64, position: Vec2) {
        if let Some(tracked) = self.touches.iter_mut().find(|t| t.id == id) {
            tracked.position = position;
            tracked.phase = TouchPhase::Ended;
        }
    }

    /// Updates the emulated pointer position in physical pixels
    pub fn set_cursor(&mut self, position: Vec2) {
        self.cursor = Some(position);
    }

    /// Updates the emulated pointer button with edge detection
    pub fn set_button_pressed(&mut self, pressed: bool) {
        self.button = if pressed {
            ButtonState::JustPressed
        } else {
            ButtonState::JustReleased
        };
    }

    /// Builds the touch snapshot for this frame
    ///
    /// Native touches come first in arrival order, then the synthetic pointer
    /// touch if one is active.
    pub fn snapshot(&self) -> TouchSnapshot {
        let mut snapshot = TouchSnapshot::new();

        for tracked in &self.touches {
            snapshot.push(Touch {
                id: TouchId(tracked.id),
                position: tracked.position,
                phase: tracked.phase,
                origin: TouchOrigin::Native,
            });
        }

        if let Some(touch) = self.pointer_touch() {
            snapshot.push(touch);
        }

        snapshot
    }

    /// Constructs the synthetic touch from mouse state, if any
    fn pointer_touch(&self) -> Option<Touch> {
        if !self.pointer_emulation {
            return None;
        }
        // The reserved identity belongs to a real touch if one claims it
        if self.touches.iter().any(|t| t.id == TouchId::POINTER.0) {
            return None;
        }
        let position = self.cursor?;

        let phase = match self.button {
            ButtonState::JustPressed => TouchPhase::Began,
            // Movement is not tracked separately for the pointer
            ButtonState::Pressed => TouchPhase::Moved,
            ButtonState::JustReleased => TouchPhase::Ended,
            ButtonState::Released => return None,
        };

        Some(Touch {
            id: TouchId::POINTER,
            position,
            phase,
            origin: TouchOrigin::PointerEmulated,
        })
    }

    /// Advance to the next frame after the snapshot has been consumed
    ///
    /// Ended touches are dropped and the rest settle to Stationary until new
    /// events arrive. Pointer button edges settle the same way.
    pub fn advance_frame(&mut self) {
        self.touches.retain(|t| t.phase != TouchPhase::Ended);
        for tracked in &mut self.touches {
            tracked.phase = TouchPhase::Stationary;
        }
        self.button = self.button.advance();
    }

    /// Number of native touches currently tracked
    pub fn native_touch_count(&self) -> usize {
        self.touches.len()
    }
}

impl Default for TouchCollector {
    fn default() -> Self {
        Self::new()
    }
}
