use super::{
    view_rects, CarId, Direction, Intersection, TickContext, TurnIntent, ViewSide,
};
use crate::config::SimulationConfig;
use crate::control::{Controller, LightController};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

const MAX_SPEED: f32 = 5.0;
const MAX_SPAWN_MULTIPLIER: f32 = 5.0;
const MIN_SPAWN_RATE: f32 = 0.1;
const MAX_ROAD_SPAWN_RATE: f32 = 2.0;
const STEP: f32 = 0.1;

/// Both intersections, their controllers and every global knob. Owns all
/// mutable simulation state.
pub struct World {
    config: SimulationConfig,
    width: i32,
    height: i32,
    intersections: [Intersection; 2],
    controllers: [Controller; 2],
    paused: bool,
    time_speed: f32,
    spawn_multiplier: f32,
    road_spawn_rate: [f32; 4],
    clock: f64,
    time_started: f64,
    dt: f32,
    refresh_timer: f32,
    rng: StdRng,
}

impl World {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = if let Some(seed) = config.world.seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        let width = config.world.width;
        let height = config.world.height;
        let intersections = Self::build_intersections(width, height, &config);
        let controllers = Self::build_controllers(&config);

        log::info!(
            "World {}x{}: {} on the left view, {} on the right view",
            width,
            height,
            controllers[0].get_name(),
            controllers[1].get_name()
        );

        Self {
            config,
            width,
            height,
            intersections,
            controllers,
            paused: false,
            time_speed: 1.0,
            spawn_multiplier: 1.0,
            road_spawn_rate: [1.0; 4],
            clock: 0.0,
            time_started: 0.0,
            dt: 0.0,
            refresh_timer: 0.0,
            rng,
        }
    }

    fn build_intersections(width: i32, height: i32, config: &SimulationConfig) -> [Intersection; 2] {
        let [left, right] = view_rects(width, height);
        [
            Intersection::new(ViewSide::Left, left, config),
            Intersection::new(ViewSide::Right, right, config),
        ]
    }

    fn build_controllers(config: &SimulationConfig) -> [Controller; 2] {
        [
            Controller::new_smart(&config.controllers),
            Controller::new_basic(&config.controllers),
        ]
    }

    /// Advance the whole world by `dt` seconds of raw time.
    pub fn tick(&mut self, dt: f32) {
        self.dt = dt;
        self.clock += dt as f64;

        let ctx = TickContext {
            now: self.clock,
            dt,
            game_speed: self.speed(),
            paused: self.paused,
            cars: &self.config.cars,
            lights: &self.config.lights,
        };

        let rects = view_rects(self.width, self.height);
        for (intersection, rect) in self.intersections.iter_mut().zip(rects) {
            intersection.layout(rect, &self.config);
            intersection.step(&ctx, &mut self.rng);
        }

        for (controller, intersection) in self.controllers.iter_mut().zip(self.intersections.iter_mut()) {
            controller.update(&ctx, intersection);
        }

        self.refresh_timer += dt;
        if self.refresh_timer >= self.config.world.refresh_interval {
            self.refresh_timer = 0.0;
            for intersection in &mut self.intersections {
                intersection.rebalance_spawn_distance(&self.config);
            }
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn intersection(&self, side: ViewSide) -> &Intersection {
        &self.intersections[side.index()]
    }

    pub fn controller(&self, side: ViewSide) -> &Controller {
        &self.controllers[side.index()]
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// World clock in raw seconds since creation.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = !self.paused;
        log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Effective game speed; zero while paused.
    pub fn speed(&self) -> f32 {
        if self.paused { 0.0 } else { self.time_speed }
    }

    pub fn time_speed(&self) -> f32 {
        self.time_speed
    }

    pub fn speed_label(&self) -> String {
        if self.paused {
            "Paused".to_string()
        } else {
            format!("{:.2}x", self.speed())
        }
    }

    pub fn set_time_speed(&mut self, speed: f32) {
        self.time_speed = speed.clamp(0.0, MAX_SPEED);
    }

    /// Speed changes also resume a paused simulation.
    pub fn increase_speed(&mut self) {
        if self.paused {
            self.pause();
        }
        self.time_speed = (self.time_speed + STEP).min(MAX_SPEED);
    }

    pub fn decrease_speed(&mut self) {
        if self.paused {
            self.pause();
        }
        self.time_speed = (self.time_speed - STEP).max(0.0);
    }

    pub fn spawn_multiplier(&self) -> f32 {
        self.spawn_multiplier
    }

    pub fn road_spawn_rate(&self, road: Direction) -> f32 {
        self.road_spawn_rate[road.index()]
    }

    pub fn spawn_label(&self) -> String {
        format!("{:.2}x", self.spawn_multiplier)
    }

    pub fn road_spawn_label(&self, road: Direction) -> String {
        format!("{:.2}x", self.road_spawn_rate[road.index()])
    }

    /// `None` adjusts the global multiplier, `Some` one road's rate.
    pub fn increase_spawn_rate(&mut self, road: Option<Direction>) {
        match road {
            Some(road) => {
                let rate = &mut self.road_spawn_rate[road.index()];
                *rate = (*rate + STEP).min(MAX_ROAD_SPAWN_RATE);
            }
            None => {
                self.spawn_multiplier = (self.spawn_multiplier + STEP).min(MAX_SPAWN_MULTIPLIER);
            }
        }
    }

    pub fn decrease_spawn_rate(&mut self, road: Option<Direction>) {
        match road {
            Some(road) => {
                let rate = &mut self.road_spawn_rate[road.index()];
                *rate = (*rate - STEP).max(MIN_SPAWN_RATE);
            }
            None => {
                self.spawn_multiplier = (self.spawn_multiplier - STEP).max(MIN_SPAWN_RATE);
            }
        }
    }

    /// Seconds between spawn attempts; read by the spawn scheduler each tick.
    pub fn spawn_interval(&self) -> f32 {
        self.config.world.base_spawn_interval / self.spawn_multiplier
    }

    pub fn set_preset(&mut self, rates: [Option<f32>; 4]) {
        for (slot, rate) in self.road_spawn_rate.iter_mut().zip(rates) {
            if let Some(rate) = rate {
                *slot = rate;
            }
        }
    }

    /// Roll for a random car and, on success, add the same car to both views.
    pub fn randomly_add_cars(&mut self, chance: u32, road: Option<Direction>) -> bool {
        let color = self.rng.gen_range(1..=9);
        let roll = self.rng.gen_range(0..=self.config.world.spawn_roll_max);
        let intent = TurnIntent::ALL[self.rng.gen_range(0..TurnIntent::ALL.len())];
        let road = match road {
            Some(road) => road,
            None => Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())],
        };

        if roll as f32 <= chance as f32 * self.road_spawn_rate[road.index()] {
            self.add_car_to_both(road, intent, color);
            true
        } else {
            false
        }
    }

    /// Index-based spawn for collaborators. Out-of-range indices are a caller bug.
    pub fn spawn_car(&mut self, road_index: usize, lane_index: usize, color: u8) -> [CarId; 2] {
        let road = Direction::try_from(road_index).unwrap_or_else(|err| panic!("{}", err));
        let intent = TurnIntent::try_from(lane_index).unwrap_or_else(|err| panic!("{}", err));
        self.add_car_to_both(road, intent, color)
    }

    fn add_car_to_both(&mut self, road: Direction, intent: TurnIntent, color: u8) -> [CarId; 2] {
        let now = self.clock;
        let config = &self.config;
        let rng = &mut self.rng;
        let [left, right] = &mut self.intersections;
        [
            left.spawn_car(road, intent, color, config, rng, now),
            right.spawn_car(road, intent, color, config, rng, now),
        ]
    }

    /// Manual light change for one view, routed through its controller.
    pub fn toggle_light(&mut self, side: ViewSide) {
        let now = self.clock;
        let index = side.index();
        self.controllers[index].toggle_light(&mut self.intersections[index], now);
    }

    pub fn controller_value(&self, side: ViewSide) -> String {
        self.controllers[side.index()].current_value()
    }

    /// Recreate both intersections and controllers from scratch.
    pub fn reset_all(&mut self) {
        self.intersections = Self::build_intersections(self.width, self.height, &self.config);
        self.controllers = Self::build_controllers(&self.config);
        log::info!("World reset");
    }

    /// Restart the statistics window without touching traffic.
    pub fn reset(&mut self) {
        self.time_started = self.clock;
        for intersection in &mut self.intersections {
            intersection.reset_car_leaves();
        }
    }

    /// Whole seconds since creation or the last `reset`.
    pub fn elapsed_secs(&self) -> u64 {
        (self.clock - self.time_started).max(0.0) as u64
    }

    pub fn leave_rate(&self, side: ViewSide) -> Option<f32> {
        self.intersection(side).leave_rate(self.elapsed_secs())
    }

    pub fn leave_rate_label(&self, side: ViewSide) -> String {
        match self.leave_rate(side) {
            Some(rate) => format!("{:.2}", rate),
            None => "N/A".to_string(),
        }
    }

    /// New window size, clamped to the configured minimum. Geometry follows
    /// on the next tick.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(self.config.world.min_width);
        self.height = height.max(self.config.world.min_height);
        log::debug!("Resized to {}x{}", self.width, self.height);
    }
}
