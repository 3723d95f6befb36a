use ballpit::*;

fn main() {
    let mut world = PhysicsWorld::with_seed(1);
    let ball_id = world.create_ball(Vec3::new(0.0, 5.0, 0.0));

    for frame in 0..240 {
        world.update(1.0 / 60.0);
        if frame % 20 == 0 {
            if let Some(ball) = world.body(ball_id) {
                println!("frame {frame:>3}: {ball}");
            }
        }
    }

    let stats = world.last_step_stats();
    stats.report(world.body_count());
    if let Some(ball) = world.body(ball_id) {
        println!("Ball resting height: {:.3}", ball.position.y);
    }
}
