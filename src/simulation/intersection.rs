use super::{
    CarId, Direction, IntersectionSnapshot, Layout, LightState, Rect, Relation, Road, TickContext,
    TurnIntent,
};
use crate::config::SimulationConfig;
use crate::error::SimError;
use rand::rngs::StdRng;

/// Which half of the window an intersection is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSide {
    Left,
    Right,
}

impl ViewSide {
    pub const ALL: [ViewSide; 2] = [ViewSide::Left, ViewSide::Right];

    pub fn index(self) -> usize {
        match self {
            ViewSide::Left => 0,
            ViewSide::Right => 1,
        }
    }
}

impl TryFrom<usize> for ViewSide {
    type Error = SimError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        ViewSide::ALL.get(index).copied().ok_or(SimError::InvalidView(index))
    }
}

/// One four-way junction. Road geometry always follows `layout`.
#[derive(Debug, Clone)]
pub struct Intersection {
    pub side: ViewSide,
    layout: Layout,
    roads: [Road; 4],
    car_leaves: u32,
    next_car_id: usize,
}

impl Intersection {
    pub fn new(side: ViewSide, rect: Rect, config: &SimulationConfig) -> Self {
        let layout = Layout::new(rect, config.layout);
        // Vertical pair starts green, horizontal pair red
        let roads = Direction::ALL.map(|direction| {
            let state = if direction.is_vertical() { LightState::Green } else { LightState::Red };
            Road::new(direction, state, &layout, &config.cars)
        });

        Self {
            side,
            layout,
            roads,
            car_leaves: 0,
            next_car_id: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        self.layout.view
    }

    pub fn geometry(&self) -> &Layout {
        &self.layout
    }

    pub fn road(&self, direction: Direction) -> &Road {
        &self.roads[direction.index()]
    }

    pub fn road_mut(&mut self, direction: Direction) -> &mut Road {
        &mut self.roads[direction.index()]
    }

    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.iter()
    }

    pub fn relative_road(&self, direction: Direction, relation: Relation) -> &Road {
        self.road(direction.relative(relation))
    }

    /// Re-derive all road geometry from a new view rectangle.
    pub fn layout(&mut self, rect: Rect, config: &SimulationConfig) {
        if rect == self.layout.view {
            return;
        }
        self.layout = Layout::new(rect, config.layout);
        for road in &mut self.roads {
            road.layout(&self.layout, &config.cars);
        }
    }

    pub fn spawn_car(
        &mut self,
        direction: Direction,
        intent: TurnIntent,
        color: u8,
        config: &SimulationConfig,
        rng: &mut StdRng,
        now: f64,
    ) -> CarId {
        let id = CarId(self.next_car_id);
        self.next_car_id += 1;
        let view_size = self.layout.view.size();
        self.roads[direction.index()].add_car(id, intent, color, view_size, &config.cars, rng, now);
        id
    }

    pub fn toggle_lights(&mut self, now: f64) {
        for road in &mut self.roads {
            road.toggle_lights(now);
        }
    }

    pub fn car_count(&self) -> usize {
        self.roads.iter().map(|road| road.cars.len()).sum()
    }

    pub fn get_all_active_road_cars(&self) -> usize {
        self.roads.iter().map(Road::get_active_cars).sum()
    }

    pub fn get_all_inactive_road_cars(&self) -> usize {
        self.roads.iter().map(Road::get_inactive_cars).sum()
    }

    pub fn car_leaves(&self) -> u32 {
        self.car_leaves
    }

    pub fn reset_car_leaves(&mut self) {
        self.car_leaves = 0;
    }

    /// Cars that left per minute. `None` until a whole second has elapsed.
    pub fn leave_rate(&self, elapsed_secs: u64) -> Option<f32> {
        if elapsed_secs == 0 {
            return None;
        }
        let minutes = elapsed_secs as f32 / 60.0;
        Some(self.car_leaves as f32 / minutes)
    }

    /// Push spawn points further out under heavy load.
    pub fn rebalance_spawn_distance(&mut self, config: &SimulationConfig) {
        let distance = config.cars.spawn_distance_for(self.car_count());
        for road in &mut self.roads {
            if road.spawn_distance != distance {
                log::debug!(
                    "{:?} view {:?} road spawn distance {} -> {}",
                    self.side, road.direction, road.spawn_distance, distance
                );
                road.spawn_distance = distance;
                road.update_lane(&self.layout, &config.cars);
            }
        }
    }

    /// One full tick: lights, decide, move, sweep.
    pub fn step(&mut self, ctx: &TickContext, rng: &mut StdRng) {
        self.update_lights(ctx);
        self.decide(ctx, rng);
        self.advance(ctx);
        self.sweep(ctx.cars.exit_distance);
    }

    pub fn update_lights(&mut self, ctx: &TickContext) {
        for road in &mut self.roads {
            road.light.update(ctx.now, ctx.game_speed, ctx.lights.transition_secs);
        }
    }

    pub fn snapshot(&self) -> IntersectionSnapshot {
        IntersectionSnapshot {
            roads: [
                self.roads[0].snapshot(),
                self.roads[1].snapshot(),
                self.roads[2].snapshot(),
                self.roads[3].snapshot(),
            ],
        }
    }

    /// Every car decides against the same pre-move snapshot, so list order
    /// never changes the outcome.
    pub fn decide(&mut self, ctx: &TickContext, rng: &mut StdRng) {
        let snapshot = self.snapshot();
        for road in &mut self.roads {
            road.decide(&snapshot, ctx, rng);
        }
    }

    pub fn advance(&mut self, ctx: &TickContext) {
        let view_size = self.layout.view.size();
        for road in &mut self.roads {
            road.advance(ctx, view_size);
        }
    }

    pub fn sweep(&mut self, exit_distance: f32) -> usize {
        let left: usize = self.roads.iter_mut().map(|road| road.sweep(exit_distance)).sum();
        self.car_leaves += left as u32;
        left
    }
}
