use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CarParams {
    /// Side length of the square car footprint
    pub size: i32,
    pub base_speed: f32,
    pub base_accel: f32,
    /// Upper bound of the uniform bonus added to speed and accel at spawn
    pub speed_jitter: f32,
    /// Spawn position jitter on both axes (+/-)
    pub spawn_jitter: f32,
    pub spawn_distance: f32,
    pub exit_distance: f32,
    /// Degrees per frame at 60 Hz when moving at full target speed
    pub turn_rate: f32,
    pub turn_speed: f32,
    pub decel_rate: f32,
    pub snap_tolerance: f32,
    pub collapse_offset_min: f32,
    pub collapse_offset_max: f32,
    /// Distance from spawn after which an opposing left-turner is treated as committed
    pub opposing_commit_x: f32,
    pub opposing_commit_y: f32,
    pub load_thresholds: Vec<LoadThreshold>,
}

/// Lane spawn distance to use once an intersection holds more than `cars` cars
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct LoadThreshold {
    pub cars: usize,
    pub spawn_distance: f32,
}

impl Default for CarParams {
    fn default() -> Self {
        Self {
            size: 30,
            base_speed: 200.0,
            base_accel: 100.0,
            speed_jitter: 1.0,
            spawn_jitter: 2.0,
            spawn_distance: 100.0,
            exit_distance: 2000.0,
            turn_rate: 90.0,
            turn_speed: 1.0,
            decel_rate: 5.0,
            snap_tolerance: 10.0,
            collapse_offset_min: 2000.0,
            collapse_offset_max: 9000.0,
            opposing_commit_x: 500.0,
            opposing_commit_y: 400.0,
            load_thresholds: vec![
                LoadThreshold { cars: 30, spawn_distance: 500.0 },
                LoadThreshold { cars: 50, spawn_distance: 1000.0 },
            ],
        }
    }
}

impl CarParams {
    /// Spawn distance for an intersection currently holding `car_count` cars.
    pub fn spawn_distance_for(&self, car_count: usize) -> f32 {
        self.load_thresholds
            .iter()
            .rev()
            .find(|t| car_count > t.cars)
            .map(|t| t.spawn_distance)
            .unwrap_or(self.spawn_distance)
    }
}

impl Validate for CarParams {
    fn validate(&self) -> Result<()> {
        if self.size <= 0 {
            return Err(anyhow!("Car size must be positive"));
        }

        if self.base_speed <= 0.0 || self.base_accel <= 0.0 {
            return Err(anyhow!("Car speed and acceleration must be positive"));
        }

        if self.speed_jitter < 0.0 || self.spawn_jitter < 0.0 {
            return Err(anyhow!("Jitter values must be non-negative"));
        }

        if self.spawn_distance < 0.0 {
            return Err(anyhow!("Spawn distance must be non-negative"));
        }

        if self.exit_distance <= 0.0 {
            return Err(anyhow!("Exit distance must be positive"));
        }

        if self.turn_rate <= 0.0 || self.turn_speed <= 0.0 {
            return Err(anyhow!("Turn rate and turn speed must be positive"));
        }

        if self.decel_rate <= 0.0 {
            return Err(anyhow!("Deceleration rate must be positive"));
        }

        if self.snap_tolerance < 0.0 || self.snap_tolerance >= 45.0 {
            return Err(anyhow!("Snap tolerance must be in range [0, 45)"));
        }

        if self.collapse_offset_min <= 0.0 || self.collapse_offset_min > self.collapse_offset_max {
            return Err(anyhow!(
                "Collapse offset range {}..{} is invalid",
                self.collapse_offset_min, self.collapse_offset_max
            ));
        }

        for pair in self.load_thresholds.windows(2) {
            if pair[1].cars <= pair[0].cars {
                return Err(anyhow!("Load thresholds must be strictly increasing in car count"));
            }
        }

        for threshold in &self.load_thresholds {
            if threshold.spawn_distance < 0.0 {
                return Err(anyhow!("Load threshold spawn distance must be non-negative"));
            }
        }

        Ok(())
    }
}
