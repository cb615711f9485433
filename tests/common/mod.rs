#![allow(dead_code)]

use ewald::{Charge, Ewald, EwaldParameters, SimulationBox};

/// Madelung constant of the rock-salt structure, referred to the nearest-neighbour distance.
pub const NACL_MADELUNG: f64 = 1.747_564_594_633;

/// The conventional rock-salt cell with nearest-neighbour distance `d` (edge `2 d`).
pub fn rock_salt_cell(d: f64) -> Vec<Charge> {
    let sodium = [[0.0, 0.0, 0.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
    let chloride = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0, 1.0]];

    let scaled = |p: [f64; 3]| [p[0] * d, p[1] * d, p[2] * d];
    sodium
        .iter()
        .map(|&p| Charge::new(scaled(p), 1.0))
        .chain(chloride.iter().map(|&p| Charge::new(scaled(p), -1.0)))
        .collect()
}

/// The two-site test system: +1 at the origin and -1 at the body centre of a unit cube.
pub fn unit_cube_dimer() -> Vec<Charge> {
    vec![
        Charge::new([0.0, 0.0, 0.0], 1.0),
        Charge::new([0.5, 0.5, 0.5], -1.0),
    ]
}

pub fn cubic_engine(length: f64, alpha: f64, kcut: f64, prefactor: f64) -> Ewald {
    let cell = SimulationBox::cubic(length).expect("valid cubic box");
    let params = EwaldParameters::new(kcut)
        .with_alpha(alpha)
        .with_prefactor(prefactor);
    Ewald::new(cell, params).expect("valid Ewald parameters")
}

/// Real-space Ewald energy of a cubic cell, summing `pair_energy` over all periodic
/// images within `images` cells in every direction.
pub fn real_space_energy(engine: &Ewald, charges: &[Charge], length: f64, images: i32) -> f64 {
    let mut energy = 0.0;
    for (i, ci) in charges.iter().enumerate() {
        for (j, cj) in charges.iter().enumerate() {
            for nx in -images..=images {
                for ny in -images..=images {
                    for nz in -images..=images {
                        if i == j && nx == 0 && ny == 0 && nz == 0 {
                            continue;
                        }
                        let d = [
                            cj.position[0] - ci.position[0] + nx as f64 * length,
                            cj.position[1] - ci.position[1] + ny as f64 * length,
                            cj.position[2] - ci.position[2] + nz as f64 * length,
                        ];
                        let r = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
                        energy += 0.5
                            * engine
                                .pair_energy(r, ci.charge * cj.charge)
                                .expect("images never coincide");
                    }
                }
            }
        }
    }
    energy
}
