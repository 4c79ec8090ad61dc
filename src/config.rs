use crate::error::GestureError;
use serde::Deserialize;
use std::path::Path;

/// Top-level settings for both gesture pipelines.
///
/// Every default reproduces the constants the device was tuned with, so an empty
/// configuration source behaves exactly like the built-in rule tables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Configuration {
    pub face: FacePipelineConfig,
    pub hand: HandPipelineConfig,
    pub gestures: GestureGeometry,
    pub logging: LoggingConfig,
    pub device_command_buffer_size: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            face: FacePipelineConfig::default(),
            hand: HandPipelineConfig::default(),
            gestures: GestureGeometry::default(),
            logging: LoggingConfig::default(),
            device_command_buffer_size: 16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FacePipelineConfig {
    pub cooldown_ms: i64,
    pub haptic_ms: u64,
    pub thresholds: FaceThresholds,
}

impl Default for FacePipelineConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 700,
            haptic_ms: 150,
            thresholds: FaceThresholds::default(),
        }
    }
}

/// Rule thresholds for the face classifier, in evaluation order.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaceThresholds {
    /// Head roll (degrees) above which the toggle fires.
    pub toggle_roll_deg: f32,
    /// Smile probability above which the view scrolls down.
    pub smile_prob: f32,
    /// Eye-open probability below which an eye counts as closed for a wink.
    pub wink_closed: f32,
    /// Eye-open probability above which the other eye counts as open for a wink.
    pub wink_open: f32,
    /// Eye-open probability below which both eyes count as closed.
    pub both_closed: f32,
    /// Head pitch (degrees) below which the home action fires.
    pub home_pitch_deg: f32,
    /// Head yaw (degrees) above which the app switcher opens.
    pub switch_yaw_deg: f32,
}

impl Default for FaceThresholds {
    fn default() -> Self {
        Self {
            toggle_roll_deg: 15.0,
            smile_prob: 0.8,
            wink_closed: 0.25,
            wink_open: 0.5,
            both_closed: 0.25,
            home_pitch_deg: -10.0,
            switch_yaw_deg: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HandPipelineConfig {
    pub cooldown_ms: i64,
    pub haptic_ms: u64,
    pub thresholds: PinchThresholds,
}

impl Default for HandPipelineConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 800,
            haptic_ms: 80,
            thresholds: PinchThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct PinchThresholds {
    /// Maximum normalized thumb-to-index distance that counts as a pinch.
    pub pinch_distance: f32,
    /// Screen point tapped on pinch.
    pub tap_x: f32,
    pub tap_y: f32,
}

impl Default for PinchThresholds {
    fn default() -> Self {
        Self {
            pinch_distance: 0.05,
            tap_x: 540.0,
            tap_y: 1200.0,
        }
    }
}

/// Screen geometry used when translating actions into device strokes.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureGeometry {
    pub swipe_x: f32,
    pub swipe_top_y: f32,
    pub swipe_bottom_y: f32,
    pub swipe_duration_ms: u64,
    pub tap_duration_ms: u64,
}

impl Default for GestureGeometry {
    fn default() -> Self {
        Self {
            swipe_x: 540.0,
            swipe_top_y: 600.0,
            swipe_bottom_y: 1600.0,
            swipe_duration_ms: 300,
            tap_duration_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Configuration {
    /// Load settings from an optional file plus `GESTFACE__*` environment variables,
    /// layered over the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, GestureError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("GESTFACE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let configuration: Configuration = settings.try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.face.cooldown_ms < 0 {
            return Err(GestureError::InvalidConfiguration(
                "Face cooldown must not be negative".to_string(),
            ));
        }

        if self.hand.cooldown_ms < 0 {
            return Err(GestureError::InvalidConfiguration(
                "Hand cooldown must not be negative".to_string(),
            ));
        }

        if !(self.hand.thresholds.pinch_distance > 0.0) {
            return Err(GestureError::InvalidConfiguration(
                "Pinch distance must be greater than 0".to_string(),
            ));
        }

        let eye = &self.face.thresholds;
        for (name, value) in [
            ("wink_closed", eye.wink_closed),
            ("wink_open", eye.wink_open),
            ("both_closed", eye.both_closed),
            ("smile_prob", eye.smile_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GestureError::InvalidConfiguration(format!(
                    "Face threshold {} must be between 0.0 and 1.0, got {}",
                    name, value
                )));
            }
        }

        if self.gestures.swipe_duration_ms == 0 || self.gestures.tap_duration_ms == 0 {
            return Err(GestureError::InvalidConfiguration(
                "Stroke durations must be greater than 0".to_string(),
            ));
        }

        if self.device_command_buffer_size == 0 {
            return Err(GestureError::InvalidConfiguration(
                "Device command buffer size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
