use std::path::Path;

use crate::animation::ease::Ease;
use crate::foundation::core::{Layout, Value};
use crate::foundation::error::{VizError, VizResult};

/// Session configuration, loadable from JSON. Every field has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_values: Vec<Value>,
    pub layout: Layout,
    pub motion: MotionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_values: vec![12, 58, 51, 21, 34, 10, 15],
            layout: Layout::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> VizResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| VizError::validation(format!("invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> VizResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            VizError::Other(anyhow::anyhow!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> VizResult<()> {
        self.layout.validate()?;
        self.motion.validate()
    }
}

/// Durations (seconds) and curves of the transitions the rendering layer plays.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub fps: f64,
    /// Push/pop/shift/unshift. Stands in for a spring, so it is a plain eased tween.
    pub boundary_secs: f64,
    pub boundary_ease: Ease,
    pub swap_secs: f64,
    pub swap_ease: Ease,
    /// Highlight fade when a compare starts.
    pub compare_secs: f64,
    /// Return to rest after a compare or a committed swap.
    pub settle_secs: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            boundary_secs: 0.5,
            boundary_ease: Ease::OutCubic,
            swap_secs: 0.8,
            swap_ease: Ease::SWAP,
            compare_secs: 0.2,
            settle_secs: 0.2,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> VizResult<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(VizError::validation("motion fps must be finite and > 0"));
        }
        for (name, secs) in [
            ("boundary_secs", self.boundary_secs),
            ("swap_secs", self.swap_secs),
            ("compare_secs", self.compare_secs),
            ("settle_secs", self.settle_secs),
        ] {
            if !secs.is_finite() || secs < 0.0 {
                return Err(VizError::validation(format!(
                    "motion {name} must be finite and >= 0"
                )));
            }
        }
        self.boundary_ease.validate()?;
        self.swap_ease.validate()
    }

    /// Whole frames a transition of `secs` lasts; never less than one.
    pub fn frames(&self, secs: f64) -> u64 {
        let frames = (secs * self.fps).ceil();
        if frames.is_finite() && frames >= 1.0 {
            frames as u64
        } else {
            1
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
