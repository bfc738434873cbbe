use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerParams {
    pub smart: SmartParams,
    pub basic: BasicParams,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct SmartParams {
    pub max_value: f32,
    pub base_offset: f32,
    pub increment_value: f32,
    pub no_traffic_multiplier: f32,
    pub value_per_car: f32,
}

impl Default for SmartParams {
    fn default() -> Self {
        Self {
            max_value: 120.0,
            base_offset: 60.0,
            increment_value: 1.0,
            no_traffic_multiplier: 5.0,
            value_per_car: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct BasicParams {
    /// Countdown budget between toggles, in game-speed scaled seconds
    pub value: f32,
}

impl Default for BasicParams {
    fn default() -> Self {
        Self { value: 50.0 }
    }
}

impl Validate for ControllerParams {
    fn validate(&self) -> Result<()> {
        let smart = &self.smart;
        if smart.max_value <= 0.0 {
            return Err(anyhow!("Smart max value must be positive"));
        }

        if smart.base_offset < 0.0 || smart.increment_value < 0.0 {
            return Err(anyhow!("Smart base offset and increment must be non-negative"));
        }

        if smart.no_traffic_multiplier < 1.0 {
            return Err(anyhow!("Smart no-traffic multiplier must be at least 1.0"));
        }

        if smart.value_per_car <= 0.0 {
            return Err(anyhow!("Smart value per car must be positive"));
        }

        if self.basic.value <= 0.0 {
            return Err(anyhow!("Basic countdown value must be positive"));
        }

        Ok(())
    }
}
