use crate::error::SimError;

/// The four approaches of an intersection, in the fixed road-array order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

/// Position of another road as seen by a driver on this road.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Opposite,
    Left,
    Right,
}

/// Turn intent of a lane; the index order is also the lane-array order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnIntent {
    Left,
    Straight,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Top, Direction::Right, Direction::Bottom, Direction::Left];

    pub fn index(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Right => 1,
            Direction::Bottom => 2,
            Direction::Left => 3,
        }
    }

    /// Road that stands in `relation` to this one. Drivers on the top road face
    /// down the screen, so their left is the right road.
    pub fn relative(self, relation: Relation) -> Direction {
        let offset = match relation {
            Relation::Opposite => 2,
            Relation::Left => 1,
            Relation::Right => 3,
        };
        Direction::ALL[(self.index() + offset) % 4]
    }

    /// Heading in screen degrees (y grows downwards) of a car entering from this road.
    pub fn entry_heading(self) -> f32 {
        match self {
            Direction::Top => 90.0,
            Direction::Right => 180.0,
            Direction::Bottom => 270.0,
            Direction::Left => 0.0,
        }
    }

    /// Vertical roads carry traffic along the y axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom)
    }
}

impl TryFrom<usize> for Direction {
    type Error = SimError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Direction::ALL.get(index).copied().ok_or(SimError::InvalidDirection(index))
    }
}

impl TurnIntent {
    pub const ALL: [TurnIntent; 3] = [TurnIntent::Left, TurnIntent::Straight, TurnIntent::Right];

    pub fn index(self) -> usize {
        match self {
            TurnIntent::Left => 0,
            TurnIntent::Straight => 1,
            TurnIntent::Right => 2,
        }
    }
}

impl TryFrom<usize> for TurnIntent {
    type Error = SimError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        TurnIntent::ALL.get(index).copied().ok_or(SimError::InvalidTurnIntent(index))
    }
}
