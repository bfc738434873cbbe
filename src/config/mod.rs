use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod layout;
pub mod cars;
pub mod controllers;

pub use layout::*;
pub use cars::*;
pub use controllers::*;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldParams,
    pub layout: LayoutParams,
    pub lights: LightParams,
    pub cars: CarParams,
    pub controllers: ControllerParams,
}

impl SimulationConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading simulation config {}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("loading simulation config {}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;

        // Validate every section before handing it to the engine
        config.validate()?;

        Ok(config)
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<()> {
        self.world.validate()?;
        self.layout.validate()?;
        self.lights.validate()?;
        self.cars.validate()?;
        self.controllers.validate()?;

        if self.world.spawn_chance > self.world.spawn_roll_max {
            anyhow::bail!(
                "Spawn chance {} can never be rolled (roll range is 0..={})",
                self.world.spawn_chance,
                self.world.spawn_roll_max
            );
        }

        // Three lanes of jittered cars must fit the narrowest road
        let lane_need = 3.0 * (self.cars.size as f32 + 2.0 * self.cars.spawn_jitter);
        if (self.layout.min_road_width as f32) < lane_need {
            anyhow::bail!(
                "Minimum road width {} cannot hold three lanes of {}px cars (needs {})",
                self.layout.min_road_width,
                self.cars.size,
                lane_need
            );
        }

        Ok(())
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
