use super::{Direction, Layout, Point, TurnIntent};

#[derive(Debug, Clone)]
pub struct Lane {
    pub intent: TurnIntent,
    spawn: Point,
}

impl Lane {
    pub fn new(direction: Direction, intent: TurnIntent, layout: &Layout, distance: f32, car_size: i32) -> Self {
        Self {
            intent,
            spawn: layout.lane_spawn(direction, intent, distance, car_size),
        }
    }

    pub fn spawn(&self) -> Point {
        self.spawn
    }

    /// Recompute the spawn point after a resize or spawn-distance change.
    pub fn update(&mut self, direction: Direction, layout: &Layout, distance: f32, car_size: i32) {
        self.spawn = layout.lane_spawn(direction, self.intent, distance, car_size);
    }
}
