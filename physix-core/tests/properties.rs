//! Behavioural properties of the engine checked through the public API.

use approx::assert_relative_eq;
use physix_core::{
    partition, Body, Boundary, CentralField, NoForce, PairResolver, ParallelDispatcher,
    SemiImplicitEuler, SimulationStep, Spawner, SpawnerConfig, TickConfig, Vec3, WallResolver,
    World,
};

fn unit_sphere(position: Vec3, velocity: Vec3) -> Body {
    Body::new(position, velocity, 1.0, 1.0).unwrap()
}

// ===== Pair resolution =====

#[test]
fn test_touching_equal_masses_exchange_velocities() {
    let mut a = unit_sphere(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
    let mut b = unit_sphere(Vec3::new(1.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0));

    assert!(PairResolver::new(1.0).resolve(&mut a, &mut b));

    assert_relative_eq!(a.velocity, Vec3::new(-2.0, 0.0, 0.0));
    assert_relative_eq!(b.velocity, Vec3::new(2.0, 0.0, 0.0));
    assert_relative_eq!(a.position, Vec3::new(-1.0, 0.0, 0.0));
    assert_relative_eq!(b.position, Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_touching_pair_exchanges_inside_a_tick() {
    let step = SimulationStep::new(&[], &NoForce);
    let mut bodies = [
        unit_sphere(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)),
        unit_sphere(Vec3::new(1.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0)),
    ];

    step.run(&mut bodies, 0.01, &TickConfig::new(1, 1)).unwrap();

    assert_relative_eq!(bodies[0].velocity, Vec3::new(-2.0, 0.0, 0.0));
    assert_relative_eq!(bodies[1].velocity, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_overlap_never_shrinks_distance() {
    let resolver = PairResolver::default();
    let offsets = [0.05, 0.3, 0.9, 1.5, 1.99];
    let velocities = [
        Vec3::zeros(),
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(-3.0, 1.0, 0.0),
        Vec3::new(0.5, -2.0, 4.0),
    ];

    for &dist in &offsets {
        for &va in &velocities {
            for &vb in &velocities {
                let direction = Vec3::new(1.0, 2.0, -0.5).normalize();
                let mut a = Body::new(Vec3::zeros(), va, 1.0, 2.0).unwrap();
                let mut b = Body::new(direction * dist, vb, 1.0, 0.5).unwrap();

                resolver.resolve(&mut a, &mut b);

                let after = (a.position - b.position).norm();
                assert!(after >= dist, "dist {dist} shrank to {after}");
                assert_relative_eq!(after, 2.0, epsilon = 1e-9);
            }
        }
    }
}

// ===== Fixed bodies =====

#[test]
fn test_fixed_body_position_survives_integration() {
    let inputs = [
        (Vec3::new(1.0, 0.0, 0.0), Vec3::zeros()),
        (Vec3::zeros(), Vec3::new(0.0, -9.8, 0.0)),
        (Vec3::new(-5.0, 3.0, 2.0), Vec3::new(100.0, 100.0, -100.0)),
    ];
    for (velocity, acceleration) in inputs {
        let start = Vec3::new(2.0, -1.0, 0.5);
        let mut body = unit_sphere(start, velocity).with_fixed(true);
        body.set_acceleration(acceleration);

        for dt in [0.0, 0.001, 1.0, 60.0] {
            SemiImplicitEuler::integrate(&mut body, dt);
            assert_eq!(body.position, start);
        }
        assert_eq!(body.velocity, velocity);
    }
}

#[test]
fn test_fixed_body_velocity_changes_on_contact() {
    let step = SimulationStep::new(&[], &NoForce);
    let mut bodies = [
        unit_sphere(Vec3::zeros(), Vec3::zeros()).with_fixed(true),
        unit_sphere(Vec3::new(2.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
    ];

    step.run(&mut bodies, 0.01, &TickConfig::new(1, 1)).unwrap();

    let pinned = bodies[0];
    assert_eq!(pinned.position, Vec3::zeros());
    assert_relative_eq!(pinned.velocity, Vec3::new(-1.0, 0.0, 0.0));
    assert_relative_eq!(bodies[1].velocity, Vec3::zeros());
}

#[test]
fn test_fixed_body_velocity_changes_on_wall_contact() {
    let walls = Boundary::enclosure(10.0, 1.0).unwrap();
    let wall = WallResolver::default();
    let mut body = unit_sphere(Vec3::new(9.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).with_fixed(true);

    assert!(wall.resolve_all(&mut body, &walls) > 0);
    assert!(body.velocity.x < 0.0);
}

// ===== Walls =====

#[test]
fn test_slow_body_stays_inside_enclosure() {
    let half = 10.0;
    let mut world = World::with_force(
        Boundary::enclosure(half, 1.0).unwrap(),
        TickConfig::new(5, 2),
        NoForce,
    );
    world
        .spawn(Vec3::new(1.0, -2.0, 3.0), Vec3::new(2.0, 1.5, -1.0), 1.0, 1.0)
        .unwrap();

    for _ in 0..2_000 {
        world.tick(1.0 / 60.0).unwrap();
        let body = world.bodies()[0];
        for coord in body.position.iter() {
            assert!(coord.abs() <= half, "escaped at {:?}", body.position);
        }
    }
}

#[test]
fn test_resting_body_stays_put() {
    let mut world = World::with_force(
        Boundary::enclosure(10.0, 1.0).unwrap(),
        TickConfig::new(5, 1),
        NoForce,
    );
    world.spawn(Vec3::new(2.0, 3.0, -4.0), Vec3::zeros(), 1.0, 1.0).unwrap();

    for _ in 0..100 {
        world.tick(0.1).unwrap();
    }

    assert_eq!(world.bodies()[0].position, Vec3::new(2.0, 3.0, -4.0));
}

// ===== Dispatch =====

#[test]
fn test_partition_covers_every_index_once() {
    for len in [0, 1, 2, 9, 10, 11, 64, 101] {
        for workers in [1, 2, 3, 4, 10, 16, 200] {
            let ranges = partition(len, workers);
            let mut seen = vec![false; len];
            for range in ranges {
                for index in range {
                    assert!(!seen[index], "index {index} covered twice");
                    seen[index] = true;
                }
            }
            assert!(seen.into_iter().all(|s| s), "gap for len={len} workers={workers}");
        }
    }
}

fn spawned_world(workers: usize) -> World {
    let mut world = World::new(Boundary::enclosure(15.0, 1.0).unwrap(), TickConfig::new(5, workers));
    let config = SpawnerConfig {
        interval: 0.01,
        max_bodies: 60,
        region: 10.0,
        ..SpawnerConfig::default()
    };
    Spawner::new(config, Some(99))
        .unwrap()
        .advance(1.0, &mut world)
        .unwrap();
    world
}

#[test]
fn test_tick_is_independent_of_worker_count() {
    let mut reference = spawned_world(1);
    for _ in 0..30 {
        reference.tick(1.0 / 60.0).unwrap();
    }

    for workers in [2, 4, 10, 64] {
        let mut world = spawned_world(workers);
        for _ in 0..30 {
            world.tick(1.0 / 60.0).unwrap();
        }
        assert_eq!(world.bodies(), reference.bodies(), "workers={workers}");
    }
}

#[test]
fn test_dispatcher_and_sequential_run_agree() {
    let walls = Boundary::enclosure(15.0, 1.0).unwrap();
    let field = CentralField::new(3.0);
    let step = SimulationStep::new(&walls, &field);

    let start = spawned_world(1).bodies().to_vec();
    let mut sequential = start.clone();
    let mut parallel = start;

    for _ in 0..20 {
        step.run(&mut sequential, 0.02, &TickConfig::new(4, 1)).unwrap();
        ParallelDispatcher::dispatch(&step, &mut parallel, 0.02, &TickConfig::new(4, 7)).unwrap();
    }

    assert_eq!(sequential, parallel);
}
