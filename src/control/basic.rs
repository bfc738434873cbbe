use crate::simulation::{Intersection, TickContext};
use super::LightController;

/// Fixed countdown between toggles, blind to traffic.
#[derive(Debug, Clone)]
pub struct Basic {
    value: f32,
    current: f32,
}

impl Basic {
    pub fn new(value: f32) -> Self {
        Self { value, current: value }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn current(&self) -> f32 {
        self.current
    }
}

impl LightController for Basic {
    fn update(&mut self, ctx: &TickContext, intersection: &mut Intersection) -> bool {
        if ctx.paused {
            return false;
        }

        self.current -= 1.0 * ctx.dt * ctx.game_speed;
        if self.current < 0.0 {
            log::info!("Basic controller toggling {:?} view lights", intersection.side);
            self.toggle_light(intersection, ctx.now);
            return true;
        }
        false
    }

    fn toggle_light(&mut self, intersection: &mut Intersection, now: f64) {
        intersection.toggle_lights(now);
        self.current = self.value;
    }

    fn current_value(&self) -> String {
        format!("{}", self.current as i32)
    }

    fn get_name(&self) -> &'static str {
        "Basic"
    }
}
