use crossroads_sim::{
    config::{ControllerParams, SimulationConfig, SmartParams},
    control::{Basic, Controller, LightController, Smart},
    simulation::{Direction, Intersection, LightState, Rect, TickContext, TurnIntent, ViewSide},
};
use rand::{rngs::StdRng, SeedableRng};

fn setup() -> (SimulationConfig, Intersection, StdRng) {
    let config = SimulationConfig::default();
    let intersection = Intersection::new(ViewSide::Left, Rect::new(0, 0, 960, 1080), &config);
    (config, intersection, StdRng::seed_from_u64(7))
}

fn context(config: &SimulationConfig, now: f64, dt: f32) -> TickContext<'_> {
    TickContext {
        now,
        dt,
        game_speed: 1.0,
        paused: false,
        cars: &config.cars,
        lights: &config.lights,
    }
}

/// Basic counts down one unit per game second and toggles once the counter drops below zero
#[test]
fn test_basic_toggles_after_countdown() {
    let (config, mut intersection, _) = setup();
    let mut basic = Basic::new(50.0);

    for tick in 1..=50 {
        let toggled = basic.update(&context(&config, tick as f64, 1.0), &mut intersection);
        assert!(!toggled, "Basic toggled early at tick {}", tick);
    }
    assert_eq!(intersection.road(Direction::Top).light.state, LightState::Green);

    assert!(basic.update(&context(&config, 51.0, 1.0), &mut intersection));
    assert_eq!(basic.current(), 50.0);
    assert_eq!(basic.current_value(), "50");
    assert_eq!(intersection.road(Direction::Top).light.state, LightState::Yellow);
    assert_eq!(intersection.road(Direction::Right).light.state, LightState::PreGreen);
}

#[test]
fn test_basic_holds_while_paused() {
    let (config, mut intersection, _) = setup();
    let mut basic = Basic::new(10.0);
    let paused = TickContext {
        game_speed: 0.0,
        paused: true,
        ..context(&config, 1.0, 1.0)
    };

    for _ in 0..100 {
        assert!(!basic.update(&paused, &mut intersection));
    }
    assert_eq!(basic.current(), 10.0);
}

#[test]
fn test_smart_toggles_empty_intersection_from_passive_pressure() {
    let (config, mut intersection, _) = setup();
    let mut smart = Smart::new(SmartParams::default());

    // Nobody on green: passive pressure grows 5 per second against a hold of 60
    for tick in 1..=12 {
        assert!(!smart.update(&context(&config, tick as f64, 1.0), &mut intersection));
    }
    assert_eq!(smart.active_value(), 60.0);
    assert_eq!(smart.inactive_value(), 60.0);

    assert!(smart.update(&context(&config, 13.0, 1.0), &mut intersection));
    assert_eq!(smart.active_value(), 0.0);
    assert_eq!(smart.inactive_value(), 0.0);
    assert_eq!(smart.current_value(), "0:0");
}

#[test]
fn test_smart_active_count_only_grows_within_a_cycle() {
    let (config, mut intersection, mut rng) = setup();
    let mut smart = Smart::new(SmartParams::default());

    for _ in 0..3 {
        intersection.spawn_car(Direction::Top, TurnIntent::Straight, 1, &config, &mut rng, 0.0);
    }
    assert_eq!(intersection.get_all_active_road_cars(), 3);

    smart.update(&context(&config, 0.1, 0.01), &mut intersection);
    assert_eq!(smart.active_cars(), 3);
    assert_eq!(smart.active_value(), 63.0);

    intersection.road_mut(Direction::Top).cars.truncate(1);
    smart.update(&context(&config, 0.2, 0.01), &mut intersection);
    assert_eq!(smart.active_cars(), 3, "Active count dropped mid-cycle");
    assert_eq!(smart.active_value(), 63.0);

    smart.toggle_light(&mut intersection, 0.3);
    assert_eq!(smart.active_cars(), 0);
    assert_eq!(smart.active_value(), 0.0);
}

#[test]
fn test_smart_active_value_is_capped() {
    let (config, mut intersection, mut rng) = setup();
    let params = SmartParams { max_value: 62.0, ..SmartParams::default() };
    let mut smart = Smart::new(params);

    for _ in 0..5 {
        intersection.spawn_car(Direction::Bottom, TurnIntent::Left, 2, &config, &mut rng, 0.0);
    }
    smart.update(&context(&config, 0.1, 0.01), &mut intersection);
    assert_eq!(smart.active_value(), 62.0);
}

#[test]
fn test_smart_waiting_queue_wins_the_light() {
    let (config, mut intersection, mut rng) = setup();
    let mut smart = Smart::new(SmartParams::default());

    // One car holding green against a long red queue
    intersection.spawn_car(Direction::Top, TurnIntent::Straight, 1, &config, &mut rng, 0.0);
    for _ in 0..70 {
        intersection.spawn_car(Direction::Right, TurnIntent::Straight, 1, &config, &mut rng, 0.0);
    }
    assert_eq!(intersection.get_all_inactive_road_cars(), 70);

    assert!(smart.update(&context(&config, 0.1, 0.01), &mut intersection));
    assert_eq!(intersection.road(Direction::Right).light.state, LightState::PreGreen);
}

#[test]
fn test_controller_dispatch() {
    let (config, mut intersection, _) = setup();
    let params = ControllerParams::default();
    let mut smart = Controller::new_smart(&params);
    let mut basic = Controller::new_basic(&params);

    assert_eq!(smart.get_name(), "Smart");
    assert_eq!(basic.get_name(), "Basic");
    assert_eq!(basic.current_value(), "50");

    basic.update(&context(&config, 1.0, 1.0), &mut intersection);
    assert_eq!(basic.current_value(), "49");

    // Manual toggle restarts the cycle
    basic.toggle_light(&mut intersection, 2.0);
    assert_eq!(basic.current_value(), "50");
    smart.toggle_light(&mut intersection, 2.0);
    assert_eq!(smart.current_value(), "0:0");
}
