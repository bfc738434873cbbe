use super::{CarId, Direction, Point, Rect, TurnIntent};

/// Public view of a car, frozen at the start of the decision phase.
#[derive(Debug, Clone, Copy)]
pub struct CarSnapshot {
    pub id: CarId,
    pub rect: Rect,
    pub intent: TurnIntent,
    pub position: Point,
    pub spawn: Point,
}

impl CarSnapshot {
    /// Far enough from its spawn point on either axis to count as committed to the junction.
    pub fn is_committed(&self, min_x: f32, min_y: f32) -> bool {
        (self.position.x - self.spawn.x).abs() > min_x || (self.position.y - self.spawn.y).abs() > min_y
    }
}

#[derive(Debug, Clone)]
pub struct RoadSnapshot {
    pub bound: Rect,
    pub stop_line: Rect,
    pub green: bool,
    pub cars: Vec<CarSnapshot>,
}

/// Everything a car may read about its surroundings during `check`.
#[derive(Debug, Clone)]
pub struct IntersectionSnapshot {
    pub roads: [RoadSnapshot; 4],
}

impl IntersectionSnapshot {
    pub fn road(&self, direction: Direction) -> &RoadSnapshot {
        &self.roads[direction.index()]
    }

    pub fn cars(&self) -> impl Iterator<Item = &CarSnapshot> {
        self.roads.iter().flat_map(|road| road.cars.iter())
    }

    /// True if `area` overlaps any car other than `own`.
    pub fn hits_other(&self, own: CarId, area: &Rect) -> bool {
        self.cars().any(|car| car.id != own && car.rect.intersects(area))
    }
}
