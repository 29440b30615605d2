//! Controls configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use config::{Config, ConfigError, Environment, File};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::controls::{
    AXIS_NAME_HORIZONTAL, AXIS_NAME_VERTICAL, Anchor, Control, ControlCore, ControlError,
    ControlKind, StickControl, ThrowableTouchpad, TouchpadControl,
};

/// Window configuration for the preview harness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be resizable
    pub resizable: bool,
}

/// Stick-specific options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickOptions {
    /// Maximum world-space knob travel from the base
    pub drag_radius: f32,
    /// Relocate the base under the finger at capture time
    pub snap_to_finger: bool,
    /// Hide the visuals while the stick is idle
    pub hide_when_idle: bool,
}

impl Default for StickOptions {
    fn default() -> Self {
        Self {
            drag_radius: 1.5,
            snap_to_finger: true,
            hide_when_idle: false,
        }
    }
}

/// Touchpad-specific options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PadOptions {
    /// Normalize every emitted delta to unit length
    pub always_normalized: bool,
}

/// Throwable-touchpad-specific options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrowOptions {
    /// Per-tick axis decay factor after release, in (0, 1)
    pub speed_decay: f32,
}

impl Default for ThrowOptions {
    fn default() -> Self {
        Self { speed_decay: 0.9 }
    }
}

fn default_axis_x() -> String {
    AXIS_NAME_HORIZONTAL.to_string()
}

fn default_axis_y() -> String {
    AXIS_NAME_VERTICAL.to_string()
}

fn default_touch_zone_size() -> [f32; 2] {
    [6.0, 6.0]
}

fn default_margin() -> [f32; 2] {
    [3.0, 3.0]
}

/// One control definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Unique control name
    pub name: String,
    /// Which variant to build
    pub kind: ControlKind,
    /// Screen corner the control snaps to
    #[serde(default)]
    pub anchor: Anchor,
    /// Axis name answering for the x component
    #[serde(default = "default_axis_x")]
    pub axis_x: String,
    /// Axis name answering for the y component
    #[serde(default = "default_axis_y")]
    pub axis_y: String,
    /// Size of the sensitive area in world units
    #[serde(default = "default_touch_zone_size")]
    pub touch_zone_size: [f32; 2],
    /// Inset from the anchored corner in world units
    #[serde(default = "default_margin")]
    pub margin: [f32; 2],
    #[serde(default)]
    pub stick: StickOptions,
    #[serde(default)]
    pub pad: PadOptions,
    #[serde(default)]
    pub throw: ThrowOptions,
}

impl ControlConfig {
    /// Builds the configured control
    ///
    /// Stick controls come back without visuals; the host attaches them
    /// before enabling.
    pub fn build(&self) -> Result<Box<dyn Control>, ControlError> {
        self.validate()?;

        let control: Box<dyn Control> = match self.kind {
            ControlKind::Stick => {
                let mut stick = StickControl::new(self.name.clone())
                    .with_drag_radius(self.stick.drag_radius)
                    .with_snap_to_finger(self.stick.snap_to_finger)
                    .with_hide_when_idle(self.stick.hide_when_idle);
                self.apply_core(stick.core_mut());
                Box::new(stick)
            }
            ControlKind::Touchpad => {
                let mut pad = TouchpadControl::new(self.name.clone())
                    .with_always_normalized(self.pad.always_normalized);
                self.apply_core(pad.core_mut());
                Box::new(pad)
            }
            ControlKind::ThrowableTouchpad => {
                let mut pad = ThrowableTouchpad::new(self.name.clone())
                    .with_always_normalized(self.pad.always_normalized)
                    .with_speed_decay(self.throw.speed_decay);
                self.apply_core(pad.core_mut());
                Box::new(pad)
            }
        };

        Ok(control)
    }

    fn apply_core(&self, core: &mut ControlCore) {
        core.set_anchor(self.anchor);
        core.set_axis_names(self.axis_x.clone(), self.axis_y.clone());
        core.set_touch_zone_size(Vec2::from_array(self.touch_zone_size));
        core.set_margin(Vec2::from_array(self.margin));
    }

    fn validate(&self) -> Result<(), ControlError> {
        if self.kind == ControlKind::Stick && self.stick.drag_radius <= 0.0 {
            return Err(ControlError::InvalidOption {
                control: self.name.clone(),
                message: format!(
                    "drag_radius must be positive, got {}",
                    self.stick.drag_radius
                ),
            });
        }

        if self.kind == ControlKind::ThrowableTouchpad
            && !(self.throw.speed_decay > 0.0 && self.throw.speed_decay < 1.0)
        {
            return Err(ControlError::InvalidOption {
                control: self.name.clone(),
                message: format!(
                    "speed_decay must be in (0, 1), got {}",
                    self.throw.speed_decay
                ),
            });
        }

        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    pub window: WindowConfig,
    /// Controls to build at startup
    #[serde(default)]
    pub controls: Vec<ControlConfig>,
}

impl ControlsConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{profile}.toml (profile-specific overrides)
    /// 3. Environment variables with prefix TOUCHSTICK_
    ///    (e.g. TOUCHSTICK_WINDOW__WIDTH=1920)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Add profile-specific configuration
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            // Add environment variables with TOUCHSTICK_ prefix
            // Use __ as separator for nested fields
            .add_source(
                Environment::with_prefix("TOUCHSTICK")
                    .separator("__")
                    .try_parsing(true),
            )
            // Set the profile
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration using the TOUCHSTICK_PROFILE environment
    /// variable, defaulting to "debug" if not set
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("TOUCHSTICK_PROFILE").unwrap_or_else(|_| "debug".to_string());
        Self::load(&profile)
    }

    /// Builds every configured control, in file order
    pub fn build_controls(&self) -> Result<Vec<Box<dyn Control>>, ControlError> {
        self.controls.iter().map(|c| c.build()).collect()
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self::load("debug").unwrap_or_else(|_| Self {
            profile: "debug".to_string(),
            window: WindowConfig {
                title: "Touchstick Preview".to_string(),
                width: 800.0,
                height: 600.0,
                resizable: true,
            },
            controls: vec![
                ControlConfig {
                    name: "left_stick".to_string(),
                    kind: ControlKind::Stick,
                    anchor: Anchor::LEFT_BOTTOM,
                    axis_x: default_axis_x(),
                    axis_y: default_axis_y(),
                    touch_zone_size: default_touch_zone_size(),
                    margin: default_margin(),
                    stick: StickOptions::default(),
                    pad: PadOptions::default(),
                    throw: ThrowOptions::default(),
                },
                ControlConfig {
                    name: "right_pad".to_string(),
                    kind: ControlKind::ThrowableTouchpad,
                    anchor: Anchor::RIGHT_BOTTOM,
                    axis_x: "LookX".to_string(),
                    axis_y: "LookY".to_string(),
                    touch_zone_size: default_touch_zone_size(),
                    margin: default_margin(),
                    stick: StickOptions::default(),
                    pad: PadOptions::default(),
                    throw: ThrowOptions::default(),
                },
            ],
        })
    }
}
