mod common;

use approx::assert_relative_eq;
use common::{cubic_engine, rock_salt_cell};
use ewald::{ChargeSet, EwaldError, PointCharge, Vec3, ZippedCharges};

/// Structure-of-arrays storage, as a trajectory frame would hold it.
struct Frame {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    q: Vec<f64>,
}

impl ChargeSet for Frame {
    fn len(&self) -> usize {
        self.q.len()
    }

    fn position(&self, index: usize) -> Vec3 {
        [self.x[index], self.y[index], self.z[index]]
    }

    fn charge(&self, index: usize) -> f64 {
        self.q[index]
    }
}

/// A record type carrying more than the Ewald engine needs.
struct Ion {
    name: &'static str,
    xyz: Vec3,
    valence: i8,
}

impl PointCharge for Ion {
    fn position(&self) -> Vec3 {
        self.xyz
    }

    fn charge(&self) -> f64 {
        f64::from(self.valence)
    }
}

#[test]
fn test_every_container_shape_gives_the_same_energy() {
    let engine = cubic_engine(2.0, 3.0, 20.0, 1.0);
    let charges = rock_salt_cell(1.0);
    let reference = engine.energy_kspace(&charges).unwrap();

    let positions: Vec<Vec3> = charges.iter().map(|c| c.position).collect();
    let q: Vec<f64> = charges.iter().map(|c| c.charge).collect();

    let zipped = ZippedCharges::new(&positions, &q).unwrap();
    let frame = Frame {
        x: positions.iter().map(|p| p[0]).collect(),
        y: positions.iter().map(|p| p[1]).collect(),
        z: positions.iter().map(|p| p[2]).collect(),
        q: q.clone(),
    };
    let ions: Vec<Ion> = charges
        .iter()
        .map(|c| Ion {
            name: if c.charge > 0.0 { "Na" } else { "Cl" },
            xyz: c.position,
            valence: c.charge as i8,
        })
        .collect();
    let tuples: Vec<(Vec3, f64)> = positions.iter().copied().zip(q.iter().copied()).collect();
    let borrowed: Vec<&Ion> = ions.iter().collect();

    assert_eq!(ions.iter().filter(|ion| ion.name == "Na").count(), 4);

    for energy in [
        engine.energy_kspace(&zipped).unwrap(),
        engine.energy_kspace(&frame).unwrap(),
        engine.energy_kspace(&ions).unwrap(),
        engine.energy_kspace(&ions[..]).unwrap(),
        engine.energy_kspace(&tuples).unwrap(),
        engine.energy_kspace(&borrowed).unwrap(),
    ] {
        assert_relative_eq!(energy, reference, max_relative = 1e-12);
    }
}

#[test]
fn test_sites_iterator_pairs_positions_with_charges() {
    let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let q = [0.2, -0.4, 0.2];
    let zipped = ZippedCharges::new(&positions, &q).unwrap();

    let sites: Vec<(Vec3, f64)> = zipped.sites().collect();
    assert_eq!(sites.len(), 3);
    for (i, (position, charge)) in sites.into_iter().enumerate() {
        assert_eq!(position, positions[i]);
        assert_eq!(charge, q[i]);
    }
}

#[test]
fn test_mismatched_parallel_sequences_fail_at_construction() {
    let positions = vec![[0.0, 0.0, 0.0]; 3];
    let q = vec![1.0, -1.0];
    let err = ZippedCharges::new(&positions, &q).unwrap_err();
    assert!(matches!(
        err,
        EwaldError::LengthMismatch {
            positions: 3,
            charges: 2
        }
    ));
    assert_eq!(
        err.to_string(),
        "Charge set length mismatch: 3 positions but 2 charges"
    );
}

#[test]
fn test_empty_frame_is_rejected() {
    let engine = cubic_engine(1.0, 1.0, 10.0, 1.0);
    let frame = Frame {
        x: vec![],
        y: vec![],
        z: vec![],
        q: vec![],
    };
    assert!(frame.is_empty());
    assert!(matches!(
        engine.energy_kspace(&frame),
        Err(EwaldError::NoCharges)
    ));
    assert!(matches!(
        engine.self_energy(&frame),
        Err(EwaldError::NoCharges)
    ));
}
