use approx::assert_abs_diff_eq;
use ballpit::*;

const DT: f32 = 1.0 / 60.0;

fn pose() -> ViewPose {
    ViewPose::new(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, 0.0, -1.0))
}

fn playground_with_ball_in_reach() -> (Playground, BodyHandle) {
    let mut playground = Playground::new(WorldConfig::deterministic(10)).expect("valid config");
    let ball = playground
        .world_mut()
        .create_ball_with_color(Vec3::new(0.0, 1.5, -1.0), Color::new(0.9, 0.4, 0.4));
    (playground, ball)
}

#[test]
fn grab_carry_and_throw() {
    let (mut playground, ball) = playground_with_ball_in_reach();
    let pose = pose();

    assert_eq!(playground.toggle_grab(&pose), GrabAction::PickedUp(ball));
    assert!(playground.world().body(ball).unwrap().is_held());

    playground.step(DT, &pose);
    let carried = playground.world().body(ball).unwrap();
    assert_eq!(carried.position, Vec3::new(0.0, 1.5, -2.0));
    assert_eq!(carried.velocity, Vec3::ZERO);

    assert_eq!(playground.throw(&pose), Some(ball));
    let thrown = playground.world().body(ball).unwrap();
    assert!(!thrown.is_held());
    assert_eq!(thrown.velocity, Vec3::new(0.0, 2.0, -15.0));
    assert!(!playground.hand().is_holding());

    playground.step(DT, &pose);
    assert!(playground.world().body(ball).unwrap().position.z < -2.0);
}

#[test]
fn second_toggle_drops_ball_at_rest() {
    let (mut playground, ball) = playground_with_ball_in_reach();
    let pose = pose();

    playground.toggle_grab(&pose);
    playground.step(DT, &pose);
    assert_eq!(playground.toggle_grab(&pose), GrabAction::Dropped(ball));

    let dropped = playground.world().body(ball).unwrap();
    assert!(!dropped.is_held());
    assert_eq!(dropped.velocity, Vec3::ZERO);

    playground.step(DT, &pose);
    assert!(playground.world().body(ball).unwrap().position.y < 1.5);
}

#[test]
fn carried_ball_is_not_pushed_by_falling_balls() {
    let mut playground = Playground::new(WorldConfig::default().with_seed(4)).expect("valid config");
    let pose = pose();
    let carried = playground
        .world_mut()
        .create_ball_with_color(Vec3::new(0.0, 1.5, -1.0), Color::new(0.9, 0.4, 0.4));
    assert_eq!(playground.toggle_grab(&pose), GrabAction::PickedUp(carried));

    playground
        .world_mut()
        .create_ball_with_color(Vec3::new(0.0, 2.3, -2.0), Color::new(0.4, 0.9, 0.4));

    let mut contacts = 0;
    for _ in 0..20 {
        playground.step(DT, &pose);
        contacts += playground.world().last_step_stats().contacts_resolved;
        assert_eq!(playground.world().body(carried).unwrap().velocity, Vec3::ZERO);
    }
    assert!(contacts > 0, "falling ball should land on the carried one");

    assert_eq!(playground.toggle_grab(&pose), GrabAction::Dropped(carried));
    assert_eq!(playground.world().body(carried).unwrap().velocity, Vec3::ZERO);
}

#[test]
fn nothing_in_reach_means_nothing_grabbed() {
    let mut playground = Playground::new(WorldConfig::deterministic(11)).expect("valid config");
    playground
        .world_mut()
        .create_ball_with_color(Vec3::new(10.0, 0.25, 10.0), Color::new(1.0, 1.0, 1.0));

    assert_eq!(playground.toggle_grab(&pose()), GrabAction::Nothing);
    assert_eq!(playground.throw(&pose()), None);
}

#[test]
fn clearing_the_world_empties_the_hand() {
    let (mut playground, _) = playground_with_ball_in_reach();
    playground.toggle_grab(&pose());
    assert_eq!(playground.status(), "balls: 1, held ball: yes");

    playground.clear();
    assert!(!playground.hand().is_holding());
    assert_eq!(playground.status(), "balls: 0, held ball: no");
    playground.step(DT, &pose());
}

#[test]
fn removed_held_ball_is_forgotten() {
    let (mut playground, ball) = playground_with_ball_in_reach();
    playground.toggle_grab(&pose());
    playground.world_mut().remove_body(ball);

    playground.step(DT, &pose());
    assert!(!playground.hand().is_holding());
}

#[test]
fn frame_time_is_clamped() {
    let mut playground = Playground::new(WorldConfig::deterministic(12)).expect("valid config");
    playground.world_mut().create_ball(Vec3::new(0.0, 5.0, 0.0));

    playground.step(5.0, &pose());
    let stats = playground.world().last_step_stats();
    assert_eq!(stats.substeps, 4);
    assert_abs_diff_eq!(stats.dropped_time, 0.1 - 4.0 * DT, epsilon = 1e-5);
}

#[test]
fn initial_scene_has_five_balls() {
    let playground =
        Playground::with_initial_scene(WorldConfig::deterministic(13), Vec3::new(0.0, 3.0, 8.0))
            .expect("valid config");
    assert_eq!(playground.world().ball_count(), 5);
}

#[test]
fn invalid_config_is_rejected() {
    let config = WorldConfig {
        max_substeps: 0,
        ..WorldConfig::default()
    };
    assert!(matches!(Playground::new(config), Err(ConfigError::NoSubsteps)));
}
