use flip::core::solve::constraints::{AxialWalls, Constraint};
use flip::core::solve::{Regime, RotatingFrame, SemiAnalytic, SliceIntegrator};
use flip::core::state::WaterColumn;

fn single_slice(z: f64, v: f64) -> WaterColumn {
    WaterColumn {
        q: vec![z],
        v: vec![v],
        slice_mass: 0.004,
    }
}

fn frame(omega: f64, drag_rate: f64) -> RotatingFrame {
    RotatingFrame {
        omega,
        center_of_mass: 0.12,
        axial_gravity: 2.54,
        drag_rate,
    }
}

/// Classic RK4 on a = -ω²(z - c) - F - γv with fine sub-steps.
fn reference(z: f64, v: f64, f: &RotatingFrame, dt: f64) -> (f64, f64) {
    let accel = |z: f64, v: f64| {
        -f.omega * f.omega * (z - f.center_of_mass) - f.axial_gravity - f.drag_rate * v
    };
    let n = 2000;
    let h = dt / n as f64;
    let (mut z, mut v) = (z, v);
    for _ in 0..n {
        let (k1z, k1v) = (v, accel(z, v));
        let (k2z, k2v) = (v + 0.5 * h * k1v, accel(z + 0.5 * h * k1z, v + 0.5 * h * k1v));
        let (k3z, k3v) = (v + 0.5 * h * k2v, accel(z + 0.5 * h * k2z, v + 0.5 * h * k2v));
        let (k4z, k4v) = (v + h * k3v, accel(z + h * k3z, v + h * k3v));
        z += h / 6.0 * (k1z + 2.0 * k2z + 2.0 * k3z + k4z);
        v += h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
    (z, v)
}

#[test]
fn test_damped_closed_forms_match_fine_integration() {
    let integrator = SemiAnalytic::new();

    // (γ, ω, dt) covering the series, circular, hyperbolic and two-root paths and the still frame
    let cases = [
        (5.0, 30.0, 1e-3),
        (5.0, 30.0, 0.05),
        (200.0, 3.0, 0.05),
        (60.0, 30.0, 0.05),
        (400.0, 0.5, 0.05),
        (5.0, 1e-7, 0.05),
        (5.0, 1e-5, 0.05),
    ];

    for (gamma, omega, dt) in cases {
        let f = frame(omega, gamma);
        let mut column = single_slice(0.2, 0.5);
        integrator.advance(&mut column, &f, dt);
        let (z, v) = reference(0.2, 0.5, &f, dt);

        println!(
            "γ={gamma} ω={omega} dt={dt}: closed ({:.15}, {:.15}) reference ({z:.15}, {v:.15})",
            column.q[0], column.v[0]
        );
        assert!((column.q[0] - z).abs() < 1e-9, "position off for γ={gamma} ω={omega} dt={dt}");
        assert!((column.v[0] - v).abs() < 1e-9, "velocity off for γ={gamma} ω={omega} dt={dt}");
    }
}

#[test]
fn test_no_jump_across_the_still_frame_threshold() {
    let integrator = SemiAnalytic::new();
    let still = frame(1e-7, 5.0);
    let rotating = frame(1e-5, 5.0);
    assert_eq!(Regime::select(&still), Regime::StillFrame);
    assert_eq!(Regime::select(&rotating), Regime::Rotating);

    for dt in [1e-3, 0.05] {
        let mut a = single_slice(0.2, 0.5);
        let mut b = single_slice(0.2, 0.5);
        integrator.advance(&mut a, &still, dt);
        integrator.advance(&mut b, &rotating, dt);

        let dz = (a.q[0] - b.q[0]).abs();
        let dv = (a.v[0] - b.v[0]).abs();
        println!("dt={dt}: |Δz| = {dz:e}, |Δv| = {dv:e}");
        assert!(dz < 1e-9 && dv < 1e-9, "regimes disagree at dt={dt}");
    }
}

#[test]
fn test_undamped_oscillation_keeps_its_energy() {
    let integrator = SemiAnalytic::new();
    let f = RotatingFrame {
        omega: 30.0,
        center_of_mass: 0.12,
        axial_gravity: 0.0,
        drag_rate: 0.0,
    };
    assert_eq!(Regime::select(&f), Regime::Undamped);

    let energy = |c: &WaterColumn| {
        let u = c.q[0] - f.center_of_mass;
        0.5 * c.v[0] * c.v[0] + 0.5 * f.omega * f.omega * u * u
    };

    let mut column = single_slice(0.2, 0.0);
    let initial = energy(&column);
    let mut worst: f64 = 0.0;
    for _ in 0..10_000 {
        integrator.advance(&mut column, &f, 1e-3);
        worst = worst.max(((energy(&column) - initial) / initial).abs());
    }

    println!("Initial energy: {initial:.6}, worst relative drift: {worst:e}");
    assert!(worst < 1e-3, "Verlet energy drifted by {worst}");
}

#[test]
fn test_inelastic_walls_stop_the_slice() {
    let integrator = SemiAnalytic::new();
    let walls = AxialWalls::new(0.0, 0.25, 0.0);
    let f = frame(0.0, 5.0);

    let mut column = single_slice(1e-5, -1.0);
    let previous = column.q.clone();
    integrator.advance(&mut column, &f, 1e-3);
    assert!(column.q[0] < 0.0, "slice should have crossed the base");

    assert_eq!(walls.project(&mut column, &previous), 1);
    assert!(column.q[0] >= 0.0);
    assert_eq!(column.v[0], 0.0);
}

#[test]
fn test_elastic_walls_keep_the_speed() {
    let integrator = SemiAnalytic::new();
    let walls = AxialWalls::new(0.0, 0.25, 1.0);
    let f = frame(0.0, 5.0);

    let mut column = single_slice(0.2499, 2.0);
    let previous = column.q.clone();
    integrator.advance(&mut column, &f, 1e-3);
    assert!(column.q[0] > 0.25, "slice should have crossed the cap");
    let speed = column.v[0];

    assert_eq!(walls.project(&mut column, &previous), 1);
    assert!(column.q[0] <= 0.25);
    assert_eq!(column.v[0], -speed);
}
