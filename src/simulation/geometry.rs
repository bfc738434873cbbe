use super::{Direction, Point, TurnIntent};
use crate::config::LayoutParams;

/// Integer screen rectangle. Edges are half-open, so rectangles that only
/// touch do not intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Splits the window into the left and right intersection views.
pub fn view_rects(width: i32, height: i32) -> [Rect; 2] {
    let half = width / 2;
    [Rect::new(0, 0, half, height), Rect::new(half, 0, half, height)]
}

/// Road, stop-line and spawn geometry of one view. Everything here is derived
/// from the view rectangle, so a resize only needs a new `Layout`.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub view: Rect,
    pub params: LayoutParams,
}

impl Layout {
    pub fn new(view: Rect, params: LayoutParams) -> Self {
        Self { view, params }
    }

    /// Shared by all four roads so the cross stays symmetric. Never narrower
    /// than `min_road_width`, so three lanes always fit side by side.
    pub fn road_width(&self) -> i32 {
        let scaled = (self.view.h as f32 * self.params.road_width_ratio) as i32;
        scaled.max(self.params.min_road_width)
    }

    fn centre(&self) -> (i32, i32) {
        (self.view.x + self.view.w / 2, self.view.y + self.view.h / 2)
    }

    /// Full band of a road across the whole view.
    pub fn road_bound(&self, direction: Direction) -> Rect {
        let (cx, cy) = self.centre();
        let rw = self.road_width();
        let v = self.view;
        match direction {
            Direction::Top => Rect::new(cx - rw, v.y, rw, v.h),
            Direction::Right => Rect::new(v.x, cy - rw, v.w, rw),
            Direction::Bottom => Rect::new(cx, v.y, rw, v.h),
            Direction::Left => Rect::new(v.x, cy, v.w, rw),
        }
    }

    /// Approach side of a road, up to the junction box. Extends past the view
    /// edge so cars still queued off-screen are counted.
    pub fn count_window(&self, direction: Direction) -> Rect {
        let (cx, cy) = self.centre();
        let rw = self.road_width();
        let v = self.view;
        match direction {
            Direction::Top => Rect::new(cx - rw, cy - v.h, rw, v.h - rw),
            Direction::Right => Rect::new(cx + rw, cy - rw, v.w - rw, rw),
            Direction::Bottom => Rect::new(cx, cy + rw, rw, v.h - rw),
            Direction::Left => Rect::new(cx - v.w, cy, v.w - rw, rw),
        }
    }

    pub fn stop_line(&self, direction: Direction) -> Rect {
        let (cx, cy) = self.centre();
        let rw = self.road_width();
        let offset = rw as f32 * self.params.stop_line_offset;
        let t = self.params.stop_line_thickness;
        match direction {
            Direction::Top => Rect::new(cx - rw, (cy as f32 - offset) as i32, rw, t),
            Direction::Right => Rect::new((cx as f32 + offset) as i32, cy - rw, t, rw),
            Direction::Bottom => Rect::new(cx, (cy as f32 + offset) as i32, rw, t),
            Direction::Left => Rect::new((cx as f32 - offset) as i32, cy, t, rw),
        }
    }

    /// Anchor of the three-lamp signal head for a road.
    pub fn light_marker(&self, direction: Direction) -> (i32, i32) {
        let (cx, cy) = self.centre();
        let rw = self.road_width();
        let inset = self.params.lamp_inset;
        let lift = self.params.lamp_lift;
        match direction {
            Direction::Top => (cx - rw - inset, cy - rw - lift),
            Direction::Right => (cx + rw + inset, cy - rw - lift),
            Direction::Bottom => (cx + rw + inset, cy + rw + inset),
            Direction::Left => (cx - rw - inset, cy + rw + inset),
        }
    }

    /// Top-left corner of a freshly spawned car. The band is split into three
    /// equal slots, left-turners nearest the centre line, and each car is
    /// centred in its slot `distance` outside the view.
    pub fn lane_spawn(&self, direction: Direction, intent: TurnIntent, distance: f32, car_size: i32) -> Point {
        let (cx, cy) = self.centre();
        let (cx, cy) = (cx as f32, cy as f32);
        let slot = self.road_width() as f32 / TurnIntent::ALL.len() as f32;
        let half = car_size as f32 / 2.0;
        let v = self.view;

        // Distance from the centre line to the middle of this lane's slot
        let lateral = (intent.index() as f32 + 0.5) * slot;

        match direction {
            Direction::Top => Point::new(cx - lateral - half, v.y as f32 - distance),
            Direction::Right => Point::new((v.x + v.w) as f32 + distance, cy - lateral - half),
            Direction::Bottom => Point::new(cx + lateral - half, (v.y + v.h) as f32 + distance),
            Direction::Left => Point::new(v.x as f32 - distance, cy + lateral - half),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9, 9, 5, 5)));
    }

    #[test]
    fn empty_rect_never_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(5, 5, 0, 3)));
    }
}
