//! End-to-end behaviour of the physics step on a full table.

use billiards_physics::step::{all_at_rest, kinetic_energy, step};
use billiards_physics::{
    apply_shot, Body, Colors, PhysicsConfig, Shot, ShotConfig, Table, Vec2,
};

const DT: f64 = 1.0 / 60.0;

fn rack() -> Vec<Body> {
    vec![
        Body::new(300.0, 200.0, Colors::CUE_WHITE),
        Body::new(600.0, 250.0, Colors::YELLOW),
        Body::new(400.0, 350.0, Colors::RED),
    ]
}

fn run_to_rest(bodies: &mut [Body], table: &Table, config: &PhysicsConfig) -> usize {
    let mut frames = 0;
    while !all_at_rest(bodies) {
        step(bodies, table, config, DT);
        frames += 1;
        assert!(frames < 20_000, "table never came to rest");
    }
    frames
}

#[test]
fn cue_ball_settles_against_left_cushion() {
    let table = Table::default();
    let config = PhysicsConfig::default();
    let mut bodies = vec![Body::new(300.0, 200.0, Colors::CUE_WHITE).with_velocity(-40.0, 0.0)];

    let mut frames = 0;
    while !all_at_rest(&bodies) {
        step(&mut bodies, &table, &config, DT);
        assert!(bodies[0].pos.x >= 67.0, "ball crossed the cushion: {}", bodies[0].pos.x);
        assert_eq!(bodies[0].pos.y, 200.0);
        frames += 1;
        assert!(frames < 20_000);
    }
    assert_eq!(bodies[0].vel, Vec2::ZERO);
    assert!(bodies[0].pos.x >= 67.0);
    assert!(table.contains(&bodies[0]));
}

#[test]
fn left_cushion_clamp_is_exact() {
    let table = Table::default();
    let config = PhysicsConfig::default();
    let mut bodies = vec![Body::new(70.0, 200.0, Colors::CUE_WHITE).with_velocity(-40.0, 0.0)];
    step(&mut bodies, &table, &config, DT);
    assert_eq!(bodies[0].pos.x, 67.0);
    assert!(bodies[0].vel.x > 0.0);
}

#[test]
fn break_shot_ends_at_rest_inside_table() {
    let table = Table::default();
    let config = PhysicsConfig::default();
    let mut bodies = rack();
    let shot = Shot::new(Vec2::new(300.0, 200.0), Vec2::new(50.0, 175.0));
    assert!(apply_shot(&mut bodies[0], &shot, &ShotConfig::default()));
    assert!(kinetic_energy(&bodies) > 0.0);

    run_to_rest(&mut bodies, &table, &config);

    assert_eq!(kinetic_energy(&bodies), 0.0);
    for b in &bodies {
        assert!(table.contains(b), "body left the table: {:?}", b.pos);
    }
}

#[test]
fn simulation_is_deterministic() {
    let table = Table::default();
    let config = PhysicsConfig::default();
    let results: Vec<Vec<Body>> = (0..3)
        .map(|_| {
            let mut bodies = rack();
            let shot = Shot::new(Vec2::new(300.0, 200.0), Vec2::new(20.0, 60.0));
            apply_shot(&mut bodies[0], &shot, &ShotConfig::default());
            for _ in 0..600 {
                step(&mut bodies, &table, &config, DT);
            }
            bodies
        })
        .collect();

    for r in &results[1..] {
        for (a, b) in results[0].iter().zip(r.iter()) {
            assert_eq!(a.pos.x, b.pos.x);
            assert_eq!(a.pos.y, b.pos.y);
            assert_eq!(a.vel, b.vel);
        }
    }
}

#[test]
fn cue_ball_transfers_motion_to_object_ball() {
    let table = Table::default();
    let config = PhysicsConfig::default();
    let mut bodies = vec![
        Body::new(200.0, 250.0, Colors::CUE_WHITE).with_velocity(8.0, 0.0),
        Body::new(400.0, 250.0, Colors::RED),
    ];
    let mut hit = false;
    for _ in 0..200 {
        let report = step(&mut bodies, &table, &config, DT);
        if report.collisions().count() > 0 {
            hit = true;
            break;
        }
    }
    assert!(hit);
    // Equal masses, e = 0.95: nearly all the cue's motion passes on.
    assert!(bodies[1].vel.x > 0.0);
    assert!(bodies[0].vel.x.abs() < bodies[1].vel.x * 0.1);
}
