use nalgebra::{Vector2, Point2};
use instant::{Duration, Instant};
use std::collections::VecDeque;

use crate::config::{CarParams, LightParams};

pub mod direction;
pub mod geometry;
pub mod light;
pub mod lane;
pub mod snapshot;
pub mod car;
pub mod road;
pub mod intersection;
pub mod world;
pub mod spawn;

pub use direction::*;
pub use geometry::*;
pub use light::*;
pub use lane::*;
pub use snapshot::*;
pub use car::*;
pub use road::*;
pub use intersection::*;
pub use world::*;
pub use spawn::*;

pub type Vec2 = Vector2<f32>;
pub type Point = Point2<f32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarId(pub usize);

/// Per-tick values shared by every phase of the update.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// World clock, raw seconds
    pub now: f64,
    pub dt: f32,
    /// Speed multiplier, zero while paused
    pub game_speed: f32,
    pub paused: bool,
    pub cars: &'a CarParams,
    pub lights: &'a LightParams,
}

/// Rolling wall-clock timing of `World::tick`.
#[derive(Debug)]
pub struct TickTimer {
    samples: VecDeque<Duration>,
    max_samples: usize,
    current_start: Option<Instant>,
    total_ticks: u64,
}

impl TickTimer {
    pub fn new(max_samples: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples: max_samples.max(1),
            current_start: None,
            total_ticks: 0,
        }
    }

    pub fn start_tick(&mut self) {
        self.current_start = Some(Instant::now());
    }

    pub fn end_tick(&mut self) {
        if let Some(start) = self.current_start.take() {
            if self.samples.len() >= self.max_samples {
                self.samples.pop_front();
            }
            self.samples.push_back(start.elapsed());
            self.total_ticks += 1;
        }
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn average_tick_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    pub fn max_tick_time(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or(Duration::ZERO)
    }
}
