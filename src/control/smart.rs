use crate::config::SmartParams;
use crate::simulation::{Intersection, TickContext};
use super::LightController;

/// Queue-sensitive policy. The green side holds the lights with a value that
/// grows with the cars it is serving; the waiting side accumulates pressure
/// from its queue plus a passive term, and wins once it exceeds the hold.
#[derive(Debug, Clone)]
pub struct Smart {
    params: SmartParams,
    active_cars: usize,
    active_value: f32,
    inactive_value: f32,
    passive_increase: f32,
}

impl Smart {
    pub fn new(params: SmartParams) -> Self {
        Self {
            params,
            active_cars: 0,
            active_value: 0.0,
            inactive_value: 0.0,
            passive_increase: 0.0,
        }
    }

    pub fn active_value(&self) -> f32 {
        self.active_value
    }

    pub fn inactive_value(&self) -> f32 {
        self.inactive_value
    }

    pub fn active_cars(&self) -> usize {
        self.active_cars
    }

    pub fn passive_increase(&self) -> f32 {
        self.passive_increase
    }

    fn reset(&mut self) {
        self.active_cars = 0;
        self.active_value = 0.0;
        self.inactive_value = 0.0;
        self.passive_increase = 0.0;
    }
}

impl LightController for Smart {
    fn update(&mut self, ctx: &TickContext, intersection: &mut Intersection) -> bool {
        if ctx.paused {
            return false;
        }
        let params = self.params;

        let mut active_cars = intersection.get_all_active_road_cars();
        let inactive_cars = intersection.get_all_inactive_road_cars();

        // Nobody is using the green, so let the queue build pressure faster
        let inactive_boost = if active_cars == 0 { params.no_traffic_multiplier } else { 1.0 };

        // The recorded count only grows within a cycle
        if active_cars < self.active_cars {
            active_cars = self.active_cars;
        } else {
            self.active_cars = active_cars;
        }

        self.active_value = (active_cars as f32 * params.value_per_car + params.base_offset).min(params.max_value);

        self.passive_increase += params.increment_value * inactive_boost * ctx.dt * ctx.game_speed;
        self.inactive_value = inactive_cars as f32 * params.value_per_car + self.passive_increase;

        if self.inactive_value > self.active_value {
            log::info!(
                "Smart controller toggling {:?} view lights ({:.1} > {:.1})",
                intersection.side, self.inactive_value, self.active_value
            );
            self.toggle_light(intersection, ctx.now);
            return true;
        }
        false
    }

    fn toggle_light(&mut self, intersection: &mut Intersection, now: f64) {
        intersection.toggle_lights(now);
        self.reset();
    }

    fn current_value(&self) -> String {
        format!("{}:{}", self.inactive_value as i32, self.active_value as i32)
    }

    fn get_name(&self) -> &'static str {
        "Smart"
    }
}
