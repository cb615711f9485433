mod common;

use approx::assert_relative_eq;
use common::{cubic_engine, rock_salt_cell, unit_cube_dimer};
use ewald::{Charge, EwaldParameters, SimulationBox, SummationRange};
use std::f64::consts::PI;

const DEFAULT_PREFACTOR: f64 = 138.9354859;

#[test]
fn test_kspace_energy_converges_with_cutoff() {
    let charges = rock_salt_cell(1.0);
    let total: f64 = charges.iter().map(|c| c.charge).sum();
    assert_eq!(total, 0.0);

    let mut engine = cubic_engine(2.0, 3.0, 10.0, DEFAULT_PREFACTOR);
    let energies: Vec<f64> = [10.0, 20.0, 30.0, 40.0, 50.0]
        .iter()
        .map(|&kcut| {
            engine.set_kcut(kcut).unwrap();
            engine.energy_kspace(&charges).unwrap()
        })
        .collect();

    let coarse_change = (energies[1] - energies[0]).abs();
    let fine_change = (energies[4] - energies[3]).abs();
    println!("energies = {energies:?}");
    assert!(fine_change < 1e-6, "not converged: change {fine_change:.3e}");
    assert!(fine_change <= coarse_change);
    assert_relative_eq!(energies[3], energies[2], max_relative = 1e-8);
}

#[test]
fn test_self_energy_is_non_negative_and_linear_in_alpha() {
    let charges = vec![
        Charge::new([0.1, 0.2, 0.3], 0.4),
        Charge::new([0.6, 0.2, 0.9], -1.3),
        Charge::new([0.3, 0.8, 0.5], 0.9),
    ];
    let e1 = cubic_engine(1.0, 1.0, 10.0, DEFAULT_PREFACTOR)
        .self_energy(&charges)
        .unwrap();
    let e3 = cubic_engine(1.0, 3.0, 10.0, DEFAULT_PREFACTOR)
        .self_energy(&charges)
        .unwrap();

    assert!(e1 >= 0.0);
    assert_relative_eq!(e3, 3.0 * e1, max_relative = 1e-14);
}

#[test]
fn test_pair_energy_limits() {
    let r = 0.8;
    let q = -2.5;

    let unscreened = cubic_engine(1.0, 1e-9, 10.0, DEFAULT_PREFACTOR);
    assert_relative_eq!(
        unscreened.pair_energy(r, q).unwrap(),
        DEFAULT_PREFACTOR * q / r,
        max_relative = 1e-6
    );

    let screened = cubic_engine(1.0, 50.0, 10.0, DEFAULT_PREFACTOR);
    assert!(screened.pair_energy(r, q).unwrap().abs() < 1e-12);

    let weak = cubic_engine(1.0, 0.5, 10.0, DEFAULT_PREFACTOR).pair_energy(r, q).unwrap();
    let strong = cubic_engine(1.0, 2.0, 10.0, DEFAULT_PREFACTOR).pair_energy(r, q).unwrap();
    assert!(weak.abs() > strong.abs());
}

#[test]
fn test_reciprocal_vectors_satisfy_duality() {
    let boxes = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([2.5, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.5]),
        ([3.0, 0.0, 0.0], [1.2, 2.8, 0.0], [-0.7, 0.9, 3.3]),
    ];
    for (a, b, c) in boxes {
        let cell = SimulationBox::new(a, b, c).unwrap();
        let engine = ewald::Ewald::new(cell, EwaldParameters::new(10.0)).unwrap();
        let recip = engine.reciprocal();

        let dot = |u: [f64; 3], v: [f64; 3]| u[0] * v[0] + u[1] * v[1] + u[2] * v[2];
        for (r, own, others) in [
            (recip.ar, a, [b, c]),
            (recip.br, b, [c, a]),
            (recip.cr, c, [a, b]),
        ] {
            assert_relative_eq!(dot(r, own), 2.0 * PI, epsilon = 1e-12);
            for other in others {
                assert_relative_eq!(dot(r, other), 0.0, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_charge_scaling_is_quadratic() {
    let engine = cubic_engine(1.5, 2.5, 20.0, DEFAULT_PREFACTOR);
    let charges = vec![
        Charge::new([0.1, 0.2, 0.3], 0.7),
        Charge::new([0.9, 1.1, 0.4], -0.2),
        Charge::new([1.3, 0.5, 1.2], -0.5),
    ];
    let factor = 3.0;
    let scaled: Vec<Charge> = charges
        .iter()
        .map(|c| Charge::new(c.position, factor * c.charge))
        .collect();

    let base = engine.kspace_breakdown(&charges).unwrap();
    let big = engine.kspace_breakdown(&scaled).unwrap();

    let k2 = factor * factor;
    assert_relative_eq!(big.self_energy, k2 * base.self_energy, max_relative = 1e-12);
    assert_relative_eq!(big.reciprocal, k2 * base.reciprocal, max_relative = 1e-12);
    assert_relative_eq!(big.net(), k2 * base.net(), max_relative = 1e-10);
}

#[test]
fn test_unit_cube_dimer_is_reproducible() {
    let engine = cubic_engine(1.0, 5.0, 10.0, DEFAULT_PREFACTOR);
    let charges = unit_cube_dimer();

    let first = engine.energy_kspace(&charges).unwrap();
    assert!(first.is_finite());
    for _ in 0..5 {
        let again = engine.energy_kspace(&charges).unwrap();
        assert!((again - first).abs() < 1e-6);
        assert_eq!(again, first);
    }
}

#[test]
fn test_snapshots_evaluate_identically_across_threads() {
    let engine = cubic_engine(1.0, 5.0, 10.0, DEFAULT_PREFACTOR);
    let charges = unit_cube_dimer();
    let reference = engine.energy_kspace(&charges).unwrap();

    let results: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let snapshot = engine.clone();
                let charges = &charges;
                scope.spawn(move || snapshot.energy_kspace(charges).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, reference);
    }
}

#[test]
fn test_half_open_range_drops_upper_planes() {
    let mut engine = cubic_engine(1.0, 5.0, 10.0, DEFAULT_PREFACTOR);
    let charges = unit_cube_dimer();

    let symmetric = engine.reciprocal_sum(&charges).unwrap();
    engine.set_range(SummationRange::HalfOpen);
    let half_open = engine.reciprocal_sum(&charges).unwrap();

    assert!(half_open > 0.0);
    assert!(half_open < symmetric);
}

#[test]
fn test_single_charge_self_energy_and_positive_sum() {
    let charges = vec![Charge::new([0.25, 0.5, 0.75], 1.0)];
    let alpha = 2.0;

    for kcut in [0.1, 1.0, 7.0, 25.0] {
        let engine = cubic_engine(1.0, alpha, kcut, DEFAULT_PREFACTOR);
        let self_energy = engine.self_energy(&charges).unwrap();
        assert_relative_eq!(
            self_energy,
            DEFAULT_PREFACTOR * alpha / PI.sqrt(),
            max_relative = 1e-14
        );

        let raw = engine.reciprocal_sum(&charges).unwrap();
        assert!(raw > 0.0, "raw sum {raw} not positive for kcut {kcut}");
    }
}

#[test]
fn test_dipolar_correction_is_opt_in() {
    let engine = cubic_engine(1.0, 5.0, 10.0, DEFAULT_PREFACTOR);
    let charges = unit_cube_dimer();
    let breakdown = engine.kspace_breakdown(&charges).unwrap();

    // The dimer has dipole (-0.5, -0.5, -0.5), so |M|^2 = 0.75.
    let expected = DEFAULT_PREFACTOR * 2.0 * PI / 3.0 * 0.75;
    assert_relative_eq!(breakdown.dipolar, expected, max_relative = 1e-12);
    assert_eq!(engine.energy_kspace(&charges).unwrap(), breakdown.net());
    assert_relative_eq!(
        breakdown.net_with_dipolar() - breakdown.net(),
        expected,
        max_relative = 1e-10
    );
}
