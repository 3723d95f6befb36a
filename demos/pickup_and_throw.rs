use ballpit::*;

fn main() {
    let eye = Vec3::new(0.0, 3.0, 8.0);
    let pose = ViewPose::new(eye, Vec3::new(0.0, -0.2, -1.0));
    let mut playground = match Playground::with_initial_scene(WorldConfig::default(), eye) {
        Ok(playground) => playground,
        Err(err) => {
            eprintln!("invalid config: {err}");
            return;
        }
    };

    // Let the opening balls land, then drop one right in front of the viewer.
    for _ in 0..180 {
        playground.step(1.0 / 60.0, &pose);
    }
    playground
        .world_mut()
        .create_ball(pose.eye + pose.front * 1.5);

    match playground.toggle_grab(&pose) {
        GrabAction::PickedUp(handle) => println!("picked up {handle}"),
        other => println!("nothing to pick up: {other:?}"),
    }
    for _ in 0..30 {
        playground.step(1.0 / 60.0, &pose);
    }
    if let Some(handle) = playground.throw(&pose) {
        for frame in 0..120 {
            playground.step(1.0 / 60.0, &pose);
            if frame % 15 == 0 {
                if let Some(ball) = playground.world().body(handle) {
                    println!("{ball}");
                }
            }
        }
    }
    println!("{}", playground.status());
}
