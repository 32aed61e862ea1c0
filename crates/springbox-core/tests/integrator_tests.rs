use glam::Vec3;
use springbox_core::{compute_body_forces, integrate, Body, Particle, PhysicsConfig};

// ---------------------------------------------------------------------------
// Reference: two particles on the X axis, half-step RK4 on (x, v)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
struct PairState {
    x: [f32; 2],
    v: [f32; 2],
}

fn pair_accel(s: &PairState, config: &PhysicsConfig, rest: f32) -> [f32; 2] {
    let delta = s.x[0] - s.x[1];
    let dist = delta.abs().max(config.min_spring_distance);
    let stretch = (dist - rest) * config.spring_constant;
    let damping = (s.v[0] - s.v[1]) * delta * config.spring_damping / dist;
    let f = delta * (-(stretch + damping) / dist);
    [
        f - s.v[0] * config.linear_damping,
        -f - s.v[1] * config.linear_damping,
    ]
}

/// (dx, dv) of one stage evaluated at `s` over a stage length `h`.
fn pair_increment(s: &PairState, h: f32, config: &PhysicsConfig, rest: f32) -> ([f32; 2], [f32; 2]) {
    let a = pair_accel(s, config, rest);
    ([s.v[0] * h, s.v[1] * h], [a[0] * h, a[1] * h])
}

fn pair_offset(s: &PairState, inc: &([f32; 2], [f32; 2])) -> PairState {
    PairState {
        x: [s.x[0] + inc.0[0], s.x[1] + inc.0[1]],
        v: [s.v[0] + inc.1[0], s.v[1] + inc.1[1]],
    }
}

fn reference_rk4(s: &PairState, dt: f32, config: &PhysicsConfig, rest: f32) -> PairState {
    let half = dt * 0.5;
    let a = pair_increment(s, half, config, rest);
    let b = pair_increment(&pair_offset(s, &a), half, config, rest);
    let c = pair_increment(&pair_offset(s, &b), half, config, rest);
    let d = pair_increment(&pair_offset(s, &c), dt, config, rest);

    let mut out = *s;
    for i in 0..2 {
        out.v[i] += (a.1[i] + 2.0 * (b.1[i] + c.1[i]) + d.1[i]) / 6.0;
        out.x[i] += (a.0[i] + 2.0 * (b.0[i] + c.0[i]) + d.0[i]) / 6.0 * config.position_overshoot;
    }
    out
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4 * b.abs().max(1.0)
}

#[test]
fn test_pair_matches_reference_rk4() {
    let config = PhysicsConfig {
        gravity: Vec3::ZERO,
        ..PhysicsConfig::default()
    };
    let rest = 10.0;
    let mut body = Body::from_points(&[Vec3::ZERO, Vec3::new(rest, 0.0, 0.0)], 1.0, 20.0).unwrap();
    body.particles_mut()[1].position.x = 13.0;
    body.particles_mut()[0].velocity.x = -1.0;

    let mut reference = PairState {
        x: [0.0, 13.0],
        v: [-1.0, 0.0],
    };

    let dt = 0.11;
    for step in 0..30 {
        compute_body_forces(&mut body, &config);
        integrate(&mut body, dt, &config);
        reference = reference_rk4(&reference, dt, &config, rest);

        for i in 0..2 {
            let p = body.particles()[i];
            assert!(
                close(p.position.x, reference.x[i]) && close(p.velocity.x, reference.v[i]),
                "step {} particle {}: got x={} v={}, reference x={} v={}",
                step,
                i,
                p.position.x,
                p.velocity.x,
                reference.x[i],
                reference.v[i]
            );
            assert_eq!(p.position.y, 0.0);
            assert_eq!(p.position.z, 0.0);
        }
    }
}

#[test]
fn test_body_at_rest_stays_at_rest() {
    let config = PhysicsConfig::springs_only();
    let points: Vec<Vec3> = (0..8)
        .map(|i| Vec3::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32) * 20.0)
        .collect();
    let mut body = Body::from_points(&points, 1.0, 40.0).unwrap();

    for _ in 0..500 {
        compute_body_forces(&mut body, &config);
        integrate(&mut body, 0.11, &config);
    }

    for (p, rest) in body.particles().iter().zip(&points) {
        assert!(
            p.position.distance(*rest) < 1e-4,
            "particle drifted from rest: {:?} vs {:?}",
            p.position,
            rest
        );
    }
}

#[test]
fn test_perturbed_body_stays_bounded() {
    let config = PhysicsConfig {
        gravity: Vec3::ZERO,
        ..PhysicsConfig::default()
    };
    let points = [
        Vec3::ZERO,
        Vec3::new(20.0, 0.0, 0.0),
        Vec3::new(0.0, 20.0, 0.0),
        Vec3::new(0.0, 0.0, 20.0),
    ];
    let mut body = Body::from_points(&points, 1.0, 30.0).unwrap();
    body.particles_mut()[3].velocity = Vec3::new(15.0, -10.0, 5.0);

    for _ in 0..500 {
        compute_body_forces(&mut body, &config);
        integrate(&mut body, 0.11, &config);
    }

    for p in body.particles() {
        assert!(p.position.is_finite() && p.velocity.is_finite());
        assert!(p.velocity.length() < 20.0, "velocity grew: {:?}", p.velocity);
    }
    // Shape is preserved: edge lengths return close to rest
    let ps = body.particles();
    let edge = ps[0].position.distance(ps[1].position);
    assert!((edge - 20.0).abs() < 1.0, "edge length {}", edge);
}

#[test]
fn test_overshoot_applies_to_position_only() {
    // Zero mass: forces never change velocity, so the motion is pure drift.
    let config = PhysicsConfig::default();
    let velocity = Vec3::new(10.0, 0.0, -5.0);
    let mut body = Body::new(&[Particle::new(Vec3::ZERO, 0.0).with_velocity(velocity)], 1.0).unwrap();

    compute_body_forces(&mut body, &config);
    integrate(&mut body, 0.1, &config);

    let p = body.particles()[0];
    assert_eq!(p.velocity, velocity);
    // three half steps and one full step: (0.5 + 2 * (0.5 + 0.5) + 1) / 6 = 3.5 / 6
    let expected = velocity * (0.1 * 3.5 / 6.0) * config.position_overshoot;
    assert!((p.position - expected).length() < 1e-5, "{:?}", p.position);
}

#[test]
fn test_constant_force_velocity_increment() {
    let config = PhysicsConfig {
        linear_damping: 0.0,
        ..PhysicsConfig::default()
    };
    let mut body = Body::from_points(&[Vec3::ZERO], 1.0, 1.0).unwrap();
    let dt = 0.1;

    compute_body_forces(&mut body, &config);
    integrate(&mut body, dt, &config);

    let p = body.particles()[0];
    let expected_dv = 65.0 * 1.0 * dt * 3.5 / 6.0;
    assert!(
        (p.velocity.y - expected_dv).abs() < 1e-5,
        "dv.y = {}, expected {}",
        p.velocity.y,
        expected_dv
    );
    assert_eq!(p.velocity.x, 0.0);
    assert_eq!(p.velocity.z, 0.0);
}

#[test]
fn test_heavier_particle_gains_the_same_velocity() {
    // gravity / mass times mass: the increment does not depend on mass
    let config = PhysicsConfig {
        linear_damping: 0.0,
        ..PhysicsConfig::default()
    };
    let mut light = Body::from_points(&[Vec3::ZERO], 1.0, 1.0).unwrap();
    let mut heavy = Body::from_points(&[Vec3::ZERO], 4.0, 1.0).unwrap();
    for body in [&mut light, &mut heavy] {
        compute_body_forces(body, &config);
        integrate(body, 0.11, &config);
    }
    let (l, h) = (light.particles()[0].velocity.y, heavy.particles()[0].velocity.y);
    assert!((l - h).abs() < 1e-5, "{} vs {}", l, h);
}

#[test]
fn test_free_particle_falls_along_gravity() {
    let config = PhysicsConfig::default();
    let mut body = Body::from_points(&[Vec3::ZERO], 1.0, 1.0).unwrap();

    for _ in 0..5 {
        compute_body_forces(&mut body, &config);
        integrate(&mut body, 0.11, &config);
    }

    let p = body.particles()[0];
    assert!(p.velocity.y > 0.0 && p.position.y > 0.0);
    assert_eq!(p.position.x, 0.0);
    assert_eq!(p.position.z, 0.0);
    // terminal velocity with damping 0.5 is 65 / 0.5 = 130
    assert!(p.velocity.y < 130.0);
}

#[test]
fn test_empty_body_is_noop() {
    let config = PhysicsConfig::default();
    let mut body = Body::new(&[], 0.0).unwrap();
    compute_body_forces(&mut body, &config);
    integrate(&mut body, 0.11, &config);
    assert!(body.is_empty());
}
