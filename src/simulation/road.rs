use super::{
    Car, CarId, Direction, IntersectionSnapshot, Lane, Layout, LightState, Rect, RoadSnapshot,
    TickContext, TrafficLight, TurnIntent,
};
use crate::config::CarParams;
use rand::rngs::StdRng;

/// One approach of an intersection: three lanes, a signal and the cars on it.
#[derive(Debug, Clone)]
pub struct Road {
    pub direction: Direction,
    pub lanes: [Lane; 3],
    pub light: TrafficLight,
    pub cars: Vec<Car>,
    pub spawn_distance: f32,
    bound: Rect,
    stop_line: Rect,
    count_window: Rect,
    light_marker: (i32, i32),
}

impl Road {
    pub fn new(direction: Direction, light_state: LightState, layout: &Layout, params: &CarParams) -> Self {
        let lanes = TurnIntent::ALL
            .map(|intent| Lane::new(direction, intent, layout, params.spawn_distance, params.size));

        Self {
            direction,
            lanes,
            light: TrafficLight::new(light_state),
            cars: Vec::new(),
            spawn_distance: params.spawn_distance,
            bound: layout.road_bound(direction),
            stop_line: layout.stop_line(direction),
            count_window: layout.count_window(direction),
            light_marker: layout.light_marker(direction),
        }
    }

    pub fn bound(&self) -> Rect {
        self.bound
    }

    pub fn stop_line(&self) -> Rect {
        self.stop_line
    }

    pub fn count_window(&self) -> Rect {
        self.count_window
    }

    pub fn light_marker(&self) -> (i32, i32) {
        self.light_marker
    }

    pub fn lane(&self, intent: TurnIntent) -> &Lane {
        &self.lanes[intent.index()]
    }

    pub fn is_green(&self) -> bool {
        self.light.is_green()
    }

    /// Recompute every rectangle and spawn point from a new view layout.
    pub fn layout(&mut self, layout: &Layout, params: &CarParams) {
        self.bound = layout.road_bound(self.direction);
        self.stop_line = layout.stop_line(self.direction);
        self.count_window = layout.count_window(self.direction);
        self.light_marker = layout.light_marker(self.direction);
        self.update_lane(layout, params);
    }

    pub fn update_lane(&mut self, layout: &Layout, params: &CarParams) {
        for lane in &mut self.lanes {
            lane.update(self.direction, layout, self.spawn_distance, params.size);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_car(
        &mut self,
        id: CarId,
        intent: TurnIntent,
        color: u8,
        view_size: (i32, i32),
        params: &CarParams,
        rng: &mut StdRng,
        now: f64,
    ) {
        let lane = &self.lanes[intent.index()];
        let car = Car::spawn(id, color, self.direction, lane, view_size, params, rng, now);
        log::debug!(
            "Spawned car {} on {:?} {:?} lane at ({:.1}, {:.1})",
            id.0, self.direction, intent, car.position.x, car.position.y
        );
        self.cars.push(car);
    }

    pub fn toggle_lights(&mut self, now: f64) {
        self.light.toggle(now);
    }

    /// Cars queued in the count window while this road may move.
    pub fn get_active_cars(&self) -> usize {
        if self.is_green() {
            self.cars_in_window()
        } else {
            0
        }
    }

    /// Cars queued in the count window while this road must wait.
    pub fn get_inactive_cars(&self) -> usize {
        if self.is_green() {
            0
        } else {
            self.cars_in_window()
        }
    }

    fn cars_in_window(&self) -> usize {
        self.cars.iter().filter(|car| car.rect.intersects(&self.count_window)).count()
    }

    pub fn snapshot(&self) -> RoadSnapshot {
        RoadSnapshot {
            bound: self.bound,
            stop_line: self.stop_line,
            green: self.is_green(),
            cars: self
                .cars
                .iter()
                .map(|car| car.snapshot(self.lane(car.intent).spawn()))
                .collect(),
        }
    }

    pub fn decide(&mut self, snapshot: &IntersectionSnapshot, ctx: &TickContext, rng: &mut StdRng) {
        for car in &mut self.cars {
            car.check(snapshot, ctx, rng);
        }
    }

    pub fn advance(&mut self, ctx: &TickContext, view_size: (i32, i32)) {
        for car in &mut self.cars {
            car.advance(ctx, view_size);
        }
    }

    /// Drop cars past the exit threshold and return how many left.
    pub fn sweep(&mut self, exit_distance: f32) -> usize {
        let lanes = &self.lanes;
        let before = self.cars.len();
        self.cars.retain(|car| {
            let exited = car.has_exited(lanes[car.intent.index()].spawn(), exit_distance);
            if exited {
                log::debug!("Car {} left via {:?}", car.id.0, car.road);
            }
            !exited
        });
        before - self.cars.len()
    }
}
