/// Signal phase of one road.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightState {
    Red,
    Yellow,
    Green,
    /// Entry already allowed while the crossing direction finishes its yellow.
    PreGreen,
}

/// Which of the three lamps are lit, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lamps {
    pub red: bool,
    pub yellow: bool,
    pub green: bool,
}

#[derive(Debug, Clone)]
pub struct TrafficLight {
    pub state: LightState,
    /// World-clock time of the last phase change
    pub changed_at: f64,
}

impl TrafficLight {
    pub fn new(state: LightState) -> Self {
        Self { state, changed_at: 0.0 }
    }

    /// GREEN starts its yellow phase, RED starts its pre-green phase. Toggles
    /// during a transition are ignored.
    pub fn toggle(&mut self, now: f64) {
        let next = match self.state {
            LightState::Green => LightState::Yellow,
            LightState::Red => LightState::PreGreen,
            LightState::Yellow | LightState::PreGreen => return,
        };
        log::debug!("Light {:?} -> {:?}", self.state, next);
        self.state = next;
        self.changed_at = now;
    }

    /// Completes a timed transition once its scaled elapsed time exceeds
    /// `transition_secs`. A game speed of zero freezes the transition.
    pub fn update(&mut self, now: f64, speed: f32, transition_secs: f64) {
        let elapsed = (now - self.changed_at) * speed as f64;
        let next = match self.state {
            LightState::Yellow if elapsed > transition_secs => LightState::Red,
            LightState::PreGreen if elapsed > transition_secs => LightState::Green,
            _ => return,
        };
        log::debug!("Light {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub fn is_green(&self) -> bool {
        matches!(self.state, LightState::Green | LightState::PreGreen)
    }

    pub fn lamps(&self) -> Lamps {
        match self.state {
            LightState::Yellow => Lamps { red: false, yellow: true, green: false },
            LightState::Green => Lamps { red: false, yellow: false, green: true },
            LightState::Red | LightState::PreGreen => Lamps { red: true, yellow: false, green: false },
        }
    }
}
