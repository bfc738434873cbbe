use crate::config::ControllerParams;
use crate::simulation::{Intersection, TickContext};

pub mod basic;
pub mod smart;

pub use basic::*;
pub use smart::*;

/// A light-switching policy for one intersection. Policies read car counts
/// and toggle the light pair; they never own roads or cars.
pub trait LightController {
    /// Advance the policy by one tick. Returns true if it toggled the lights.
    fn update(&mut self, ctx: &TickContext, intersection: &mut Intersection) -> bool;
    /// Toggle the light pair and restart the policy's cycle.
    fn toggle_light(&mut self, intersection: &mut Intersection, now: f64);
    /// Short status string for display.
    fn current_value(&self) -> String;
    fn get_name(&self) -> &'static str;
}

pub enum Controller {
    Basic(Basic),
    Smart(Smart),
}

impl Controller {
    pub fn new_basic(params: &ControllerParams) -> Self {
        Controller::Basic(Basic::new(params.basic.value))
    }

    pub fn new_smart(params: &ControllerParams) -> Self {
        Controller::Smart(Smart::new(params.smart))
    }
}

impl LightController for Controller {
    fn update(&mut self, ctx: &TickContext, intersection: &mut Intersection) -> bool {
        match self {
            Controller::Basic(controller) => controller.update(ctx, intersection),
            Controller::Smart(controller) => controller.update(ctx, intersection),
        }
    }

    fn toggle_light(&mut self, intersection: &mut Intersection, now: f64) {
        match self {
            Controller::Basic(controller) => controller.toggle_light(intersection, now),
            Controller::Smart(controller) => controller.toggle_light(intersection, now),
        }
    }

    fn current_value(&self) -> String {
        match self {
            Controller::Basic(controller) => controller.current_value(),
            Controller::Smart(controller) => controller.current_value(),
        }
    }

    fn get_name(&self) -> &'static str {
        match self {
            Controller::Basic(controller) => controller.get_name(),
            Controller::Smart(controller) => controller.get_name(),
        }
    }
}
