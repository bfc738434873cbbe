use super::World;

/// Drives random spawning on its own cadence. The interval is re-read from
/// the world every tick, so spawn-rate changes apply immediately.
#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    elapsed: f32,
    attempts: u64,
    spawned: u64,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many spawn rolls succeeded during this tick.
    pub fn update(&mut self, world: &mut World, dt: f32) -> usize {
        if world.is_paused() {
            return 0;
        }

        self.elapsed += dt;
        let interval = world.spawn_interval();
        let chance = world.config().world.spawn_chance;

        let mut spawned = 0;
        while self.elapsed >= interval {
            self.elapsed -= interval;
            self.attempts += 1;
            if world.randomly_add_cars(chance, None) {
                spawned += 1;
            }
        }

        self.spawned += spawned as u64;
        spawned
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}
