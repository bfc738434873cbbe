use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldParams {
    pub width: i32,
    pub height: i32,
    pub min_width: i32,
    pub min_height: i32,
    /// Seconds between spawn attempts at a spawn multiplier of 1.0
    pub base_spawn_interval: f32,
    pub spawn_chance: u32,
    pub spawn_roll_max: u32,
    /// Seconds between load re-evaluations of the lane spawn distance
    pub refresh_interval: f32,
    pub seed: Option<u64>,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            min_width: 1280,
            min_height: 720,
            base_spawn_interval: 1.0,
            spawn_chance: 50,
            spawn_roll_max: 120,
            refresh_interval: 1.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Road width as a fraction of the view height
    pub road_width_ratio: f32,
    /// Floor on the road width in pixels, wide enough for three lanes of cars
    pub min_road_width: i32,
    /// Distance of the stop line from the centre, in road widths
    pub stop_line_offset: f32,
    pub stop_line_thickness: i32,
    /// Pixel offset of the lamp stack from the road corner
    pub lamp_inset: i32,
    pub lamp_lift: i32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            road_width_ratio: 0.1,
            min_road_width: 102,
            stop_line_offset: 1.7,
            stop_line_thickness: 5,
            lamp_inset: 40,
            lamp_lift: 80,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct LightParams {
    /// Seconds (scaled by game speed) spent in YELLOW and PRE_GREEN
    pub transition_secs: f64,
}

impl Default for LightParams {
    fn default() -> Self {
        Self { transition_secs: 4.0 }
    }
}

impl Validate for WorldParams {
    fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(anyhow!("Window dimensions must be positive"));
        }

        if self.min_width <= 0 || self.min_height <= 0 {
            return Err(anyhow!("Minimum window dimensions must be positive"));
        }

        if self.width < self.min_width || self.height < self.min_height {
            return Err(anyhow!(
                "Window {}x{} is smaller than the minimum {}x{}",
                self.width, self.height, self.min_width, self.min_height
            ));
        }

        if self.base_spawn_interval <= 0.0 {
            return Err(anyhow!("Base spawn interval must be positive"));
        }

        if self.refresh_interval <= 0.0 {
            return Err(anyhow!("Refresh interval must be positive"));
        }

        Ok(())
    }
}

impl Validate for LayoutParams {
    fn validate(&self) -> Result<()> {
        if self.road_width_ratio <= 0.0 || self.road_width_ratio >= 0.5 {
            return Err(anyhow!(
                "Road width ratio must be in range (0, 0.5), got {}",
                self.road_width_ratio
            ));
        }

        if self.min_road_width <= 0 {
            return Err(anyhow!("Minimum road width must be positive"));
        }

        if self.stop_line_offset < 1.0 {
            return Err(anyhow!("Stop line must sit outside the junction box (offset >= 1.0)"));
        }

        if self.stop_line_thickness <= 0 {
            return Err(anyhow!("Stop line thickness must be positive"));
        }

        Ok(())
    }
}

impl Validate for LightParams {
    fn validate(&self) -> Result<()> {
        if self.transition_secs <= 0.0 {
            return Err(anyhow!("Light transition time must be positive"));
        }
        Ok(())
    }
}
