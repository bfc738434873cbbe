use super::{
    CarId, CarSnapshot, Direction, IntersectionSnapshot, Lane, Point, Rect, Relation, TickContext,
    TurnIntent, Vec2,
};
use crate::config::CarParams;
use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Accelerating,
    Decelerating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Approaching,
    Turning,
    Turned,
}

#[derive(Debug, Clone)]
pub struct Car {
    pub id: CarId,
    /// Sprite index 1..=9, only meaningful to the renderer
    pub color: u8,
    pub road: Direction,
    pub intent: TurnIntent,
    /// Authoritative position; `rect` is derived from it every update
    pub position: Point,
    pub rect: Rect,
    pub velocity: Vec2,
    /// Target speed at a game speed of 1.0
    pub cruise_speed: f32,
    pub turning_speed: f32,
    pub accel: f32,
    pub orientation: f32,
    pub original_orientation: f32,
    pub motion: MotionState,
    pub turn: TurnPhase,
    pub turn_progress: f32,
    pub turn_started_at: Option<f64>,
    pub last_transition: f64,
    lookahead_offset: (i32, i32),
    lookahead_size: (i32, i32),
    view_size: (i32, i32),
}

impl Car {
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        id: CarId,
        color: u8,
        road: Direction,
        lane: &Lane,
        view_size: (i32, i32),
        params: &CarParams,
        rng: &mut StdRng,
        now: f64,
    ) -> Self {
        let speed = params.base_speed + rng.gen::<f32>() * params.speed_jitter;
        let accel = params.base_accel + rng.gen::<f32>() * params.speed_jitter;

        let jitter = Uniform::new_inclusive(-params.spawn_jitter, params.spawn_jitter);
        let spawn = lane.spawn();
        let position = Point::new(spawn.x + jitter.sample(rng), spawn.y + jitter.sample(rng));

        // Lookahead sits just past the front bumper, two car lengths long
        let size = params.size;
        let gap = rng.gen_range(1..=4);
        let orientation = road.entry_heading();
        let (lookahead_offset, lookahead_size) = match heading_axis(orientation) {
            (1, _) => ((size + gap, 0), (size * 2, size)),
            (-1, _) => ((-(size * 2 + gap), 0), (size * 2, size)),
            (_, 1) => ((0, size + gap), (size, size * 2)),
            _ => ((0, -(size * 2 + gap)), (size, size * 2)),
        };

        let mut car = Self {
            id,
            color,
            road,
            intent: lane.intent,
            position,
            rect: Rect::new(0, 0, size, size),
            velocity: Vec2::zeros(),
            cruise_speed: speed,
            turning_speed: speed / 2.0,
            accel,
            orientation,
            original_orientation: orientation,
            motion: MotionState::Accelerating,
            turn: TurnPhase::Approaching,
            turn_progress: 0.0,
            turn_started_at: None,
            last_transition: now,
            lookahead_offset,
            lookahead_size,
            view_size,
        };
        car.sync_rect();
        car
    }

    pub fn is_turning(&self) -> bool {
        self.turn == TurnPhase::Turning
    }

    pub fn turned(&self) -> bool {
        self.turn == TurnPhase::Turned
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    pub fn lookahead(&self) -> Rect {
        Rect::new(
            self.rect.x + self.lookahead_offset.0,
            self.rect.y + self.lookahead_offset.1,
            self.lookahead_size.0,
            self.lookahead_size.1,
        )
    }

    pub fn snapshot(&self, spawn: Point) -> CarSnapshot {
        CarSnapshot {
            id: self.id,
            rect: self.rect,
            intent: self.intent,
            position: self.position,
            spawn,
        }
    }

    /// Move the car without integrating, e.g. when placing it by hand.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.sync_rect();
    }

    pub fn accelerate(&mut self, now: f64) {
        if self.motion == MotionState::Decelerating {
            self.motion = MotionState::Accelerating;
            self.last_transition = now;
        }
    }

    pub fn decelerate(&mut self, now: f64) {
        if self.motion == MotionState::Accelerating {
            self.motion = MotionState::Decelerating;
            self.last_transition = now;
        }
    }

    /// Decision phase. Reads only the frozen snapshot and writes only this car.
    pub fn check(&mut self, snapshot: &IntersectionSnapshot, ctx: &TickContext, rng: &mut StdRng) {
        if self.turned() {
            self.accelerate(ctx.now);
            return;
        }

        if self.must_yield(snapshot, ctx, rng) {
            self.decelerate(ctx.now);
        } else {
            self.accelerate(ctx.now);
        }
    }

    fn must_yield(&mut self, snapshot: &IntersectionSnapshot, ctx: &TickContext, rng: &mut StdRng) -> bool {
        let own = snapshot.road(self.road);
        let left = snapshot.road(self.road.relative(Relation::Left));
        let right = snapshot.road(self.road.relative(Relation::Right));
        let opposite = snapshot.road(self.road.relative(Relation::Opposite));
        let lookahead = self.lookahead();

        // Stop line rules
        if lookahead.intersects(&own.stop_line) {
            if !own.green {
                return true;
            }
            if snapshot.hits_other(self.id, &lookahead) {
                return true;
            }
            // Cross traffic still clearing our band
            if right.cars.iter().any(|car| car.rect.intersects(&own.bound)) {
                return true;
            }
            if lookahead.intersects(&left.bound) {
                let crossing = left.cars.iter().find(|car| car.rect.intersects(&opposite.bound));
                if crossing.is_some_and(|car| car.rect.intersects(&left.bound)) {
                    return true;
                }
            }
        }

        match self.intent {
            TurnIntent::Left => {
                if yields_to_opposing_left_turns(self.road)
                    && self.rect.intersects(&own.bound)
                    && lookahead.intersects(&left.bound)
                {
                    let committed = opposite
                        .cars
                        .iter()
                        .filter(|car| car.intent == TurnIntent::Left && car.rect.intersects(&opposite.bound))
                        .any(|car| car.is_committed(ctx.cars.opposing_commit_x, ctx.cars.opposing_commit_y));
                    if committed {
                        return true;
                    }
                }

                if self.rect.intersects(&right.bound) {
                    if self.turn == TurnPhase::Approaching {
                        self.begin_turn(ctx.now, ctx.cars, rng);
                    }
                    let oncoming = opposite.cars.iter().find(|car| car.rect.intersects(&right.bound));
                    if oncoming.is_some_and(|car| {
                        car.intent != TurnIntent::Left && car.rect.intersects(&opposite.bound)
                    }) {
                        return true;
                    }
                }
            }
            TurnIntent::Right => {
                if self.turn == TurnPhase::Approaching && self.rect.intersects(&left.bound) {
                    self.begin_turn(ctx.now, ctx.cars, rng);
                }
            }
            TurnIntent::Straight => {}
        }

        // The lookahead may have collapsed above
        snapshot.hits_other(self.id, &self.lookahead())
    }

    /// Enter the turn: halve the target speed and park the lookahead far ahead on
    /// the old heading so it stops reporting stale collisions.
    pub fn begin_turn(&mut self, now: f64, params: &CarParams, rng: &mut StdRng) {
        let distance = rng.gen_range(params.collapse_offset_min..=params.collapse_offset_max) as i32;
        let (dx, dy) = heading_axis(self.original_orientation);

        self.turn = TurnPhase::Turning;
        self.cruise_speed = self.turning_speed;
        self.lookahead_offset = (dx * distance, dy * distance);
        self.lookahead_size = (1, 1);
        self.turn_started_at = Some(now);

        log::debug!("Car {} on {:?} starts {:?} turn", self.id.0, self.road, self.intent);
    }

    /// Move phase: rescale for a resized view, then integrate unless paused.
    pub fn advance(&mut self, ctx: &TickContext, view_size: (i32, i32)) {
        self.rescale(view_size);

        if !ctx.paused {
            if self.is_turning() {
                self.update_turn(ctx);
            }
            self.integrate(ctx);
        }

        self.sync_rect();
    }

    fn rescale(&mut self, view_size: (i32, i32)) {
        if view_size == self.view_size {
            return;
        }
        let scale_x = view_size.0 as f32 / self.view_size.0 as f32;
        let scale_y = view_size.1 as f32 / self.view_size.1 as f32;
        self.position.x *= scale_x;
        self.position.y *= scale_y;
        self.view_size = view_size;
    }

    fn integrate(&mut self, ctx: &TickContext) {
        let dt = ctx.dt;
        let game_speed = ctx.game_speed;
        let target_speed = self.cruise_speed * game_speed;

        // Transient turning angles still drive along a cardinal axis
        let heading = snap_orientation(self.orientation, ctx.cars.snap_tolerance);
        let (dx, dy) = heading_axis(heading);
        let target = Vec2::new(dx as f32, dy as f32) * target_speed;

        match self.motion {
            MotionState::Accelerating => {
                self.velocity = lerp(self.velocity, target, dt * game_speed);
            }
            MotionState::Decelerating => {
                self.velocity *= (1.0 - ctx.cars.decel_rate * dt * game_speed).max(0.0);
            }
        }

        let speed = self.velocity.norm();
        if speed > target_speed {
            self.velocity *= target_speed / speed;
        }

        self.position += self.velocity * dt;
    }

    fn update_turn(&mut self, ctx: &TickContext) {
        let current_speed = self.velocity.norm();
        let target_speed = self.cruise_speed * ctx.game_speed;
        // A stationary car does not rotate
        if current_speed <= 0.0 || target_speed <= 0.0 {
            return;
        }
        let sign = match self.intent {
            TurnIntent::Left => -1.0,
            TurnIntent::Right => 1.0,
            TurnIntent::Straight => return,
        };

        let speed_ratio = current_speed / target_speed;
        let params = ctx.cars;
        let turn_rate = params.turn_rate * speed_ratio * ctx.game_speed * ctx.dt * 60.0;
        let final_heading = (self.original_orientation + sign * 90.0).rem_euclid(360.0);

        let potential = (self.orientation + sign * turn_rate).rem_euclid(360.0);
        let swept = (potential - self.original_orientation).abs();
        self.orientation = if swept <= 90.0 || swept >= 270.0 {
            potential
        } else {
            final_heading
        };

        self.turn_progress += ctx.dt * params.turn_speed * speed_ratio * ctx.game_speed;
        if self.turn_progress >= 1.0 {
            self.turn = TurnPhase::Turned;
            self.orientation = final_heading;
            self.cruise_speed = self.turning_speed * 2.0;
            log::debug!("Car {} finished turning, heading {}", self.id.0, self.orientation);
        }
    }

    /// Past the exit threshold on either axis.
    pub fn has_exited(&self, spawn: Point, exit_distance: f32) -> bool {
        (self.position.x - spawn.x).abs() > exit_distance || (self.position.y - spawn.y).abs() > exit_distance
    }

    fn sync_rect(&mut self) {
        self.rect.x = self.position.x.floor() as i32;
        self.rect.y = self.position.y.floor() as i32;
    }
}

fn yields_to_opposing_left_turns(road: Direction) -> bool {
    matches!(road, Direction::Top | Direction::Left)
}

fn lerp(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Nearest cardinal heading; anything within `tolerance` of a cardinal snaps to it first.
pub fn snap_orientation(orientation: f32, tolerance: f32) -> f32 {
    const CARDINALS: [f32; 5] = [0.0, 90.0, 180.0, 270.0, 360.0];
    let normalized = orientation.rem_euclid(360.0);

    if let Some(&degree) = CARDINALS.iter().find(|&&d| (normalized - d).abs() < tolerance) {
        return degree;
    }

    CARDINALS
        .iter()
        .copied()
        .min_by(|a, b| (a - normalized).abs().total_cmp(&(b - normalized).abs()))
        .unwrap_or(0.0)
}

/// Unit screen-axis step for a heading, e.g. 90 degrees is (0, 1).
pub fn heading_axis(degrees: f32) -> (i32, i32) {
    const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
    let quadrant = (degrees.rem_euclid(360.0) / 90.0).round() as usize % 4;
    AXES[quadrant]
}
