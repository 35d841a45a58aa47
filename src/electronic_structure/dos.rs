use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::electronic_structure::core::{OrbitalType, Spin};
use crate::error::EsPlotError;
use crate::Result;

/// A density of states on a fixed energy grid.
///
/// Energies are absolute (not referenced to the Fermi level); shifting to
/// `E - E_f` is a plotting decision and happens in the adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dos {
    /// Fermi energy (eV)
    pub efermi: f64,
    /// Energy grid (eV), assumed approximately uniform
    pub energies: Vec<f64>,
    /// Densities per spin channel, one value per grid point
    pub densities: HashMap<Spin, Vec<f64>>,
}

impl Dos {
    /// Construct a DOS, validating that every density array matches the grid.
    pub fn new(efermi: f64, energies: Vec<f64>, densities: HashMap<Spin, Vec<f64>>) -> Result<Self> {
        if energies.is_empty() {
            return Err(EsPlotError::EmptyData("DOS energy grid"));
        }
        for dens in densities.values() {
            if dens.len() != energies.len() {
                return Err(EsPlotError::LengthMismatch {
                    context: "DOS densities vs energy grid",
                    left: dens.len(),
                    right: energies.len(),
                });
            }
        }
        Ok(Self {
            efermi,
            energies,
            densities,
        })
    }

    /// Densities for one spin channel, if present.
    pub fn density(&self, spin: Spin) -> Option<&[f64]> {
        self.densities.get(&spin).map(Vec::as_slice)
    }

    /// Gaussian-smeared densities for nicer-looking plots.
    ///
    /// `sigma` is the standard deviation in energy units; it is converted to
    /// grid points using the mean grid spacing. The kernel is truncated at 4σ
    /// and the signal is reflected at both ends of the grid.
    pub fn smeared_densities(&self, sigma: f64) -> HashMap<Spin, Vec<f64>> {
        let avg_spacing = average_spacing(&self.energies);
        let sigma_pts = if avg_spacing > 0.0 {
            sigma / avg_spacing
        } else {
            0.0
        };

        self.densities
            .iter()
            .map(|(&spin, dens)| (spin, gaussian_filter(dens, sigma_pts)))
            .collect()
    }
}

/// A total DOS together with per-element, per-orbital projected densities,
/// all sharing the total's energy grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteDos {
    pub total: Dos,
    /// Projections in element insertion order: element symbol ->
    /// orbital character -> spin -> densities
    pub pdos: Vec<(String, HashMap<OrbitalType, HashMap<Spin, Vec<f64>>>)>,
}

impl CompleteDos {
    /// Element symbols in insertion order.
    pub fn elements(&self) -> Vec<&str> {
        self.pdos.iter().map(|(el, _)| el.as_str()).collect()
    }

    /// Per-element DOS (summed over orbital characters).
    pub fn element_dos(&self) -> Vec<(String, Dos)> {
        self.pdos
            .iter()
            .map(|(el, by_orbital)| {
                let mut summed: HashMap<Spin, Vec<f64>> = HashMap::new();
                for by_spin in by_orbital.values() {
                    accumulate(&mut summed, by_spin, self.total.energies.len());
                }
                (
                    el.clone(),
                    Dos {
                        efermi: self.total.efermi,
                        energies: self.total.energies.clone(),
                        densities: summed,
                    },
                )
            })
            .collect()
    }

    /// Per-orbital-character DOS (summed over elements), in s, p, d, f order.
    /// Characters with no contribution anywhere are omitted.
    pub fn spd_dos(&self) -> Vec<(OrbitalType, Dos)> {
        let mut out = Vec::new();
        for orbital in OrbitalType::ALL {
            let mut summed: HashMap<Spin, Vec<f64>> = HashMap::new();
            let mut present = false;
            for (_, by_orbital) in &self.pdos {
                if let Some(by_spin) = by_orbital.get(&orbital) {
                    present = true;
                    accumulate(&mut summed, by_spin, self.total.energies.len());
                }
            }
            if present {
                out.push((
                    orbital,
                    Dos {
                        efermi: self.total.efermi,
                        energies: self.total.energies.clone(),
                        densities: summed,
                    },
                ));
            }
        }
        out
    }
}

fn accumulate(target: &mut HashMap<Spin, Vec<f64>>, source: &HashMap<Spin, Vec<f64>>, n: usize) {
    for (&spin, dens) in source {
        let entry = target.entry(spin).or_insert_with(|| vec![0.0; n]);
        for (acc, d) in entry.iter_mut().zip(dens) {
            *acc += d;
        }
    }
}

fn average_spacing(grid: &[f64]) -> f64 {
    if grid.len() < 2 {
        return 0.0;
    }
    (grid[grid.len() - 1] - grid[0]) / (grid.len() - 1) as f64
}

/// 1D Gaussian filter with reflected boundaries, `sigma` in grid points.
fn gaussian_filter(signal: &[f64], sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 || signal.is_empty() {
        return signal.to_vec();
    }

    let radius = (4.0 * sigma).ceil() as isize;
    let mut kernel = Vec::with_capacity((2 * radius + 1) as usize);
    for offset in -radius..=radius {
        let x = offset as f64;
        kernel.push((-0.5 * (x / sigma).powi(2)).exp());
    }
    let norm: f64 = kernel.iter().sum();

    let n = signal.len() as isize;
    let mut smeared = Vec::with_capacity(signal.len());
    for i in 0..n {
        let mut acc = 0.0;
        for (k, weight) in kernel.iter().enumerate() {
            let mut j = i + k as isize - radius;
            // Reflect: ... 2 1 | 0 1 2 ... n-1 | n-2 n-3 ...
            if j < 0 {
                j = -j - 1;
            }
            if j >= n {
                j = 2 * n - 1 - j;
            }
            let j = j.clamp(0, n - 1) as usize;
            acc += weight * signal[j];
        }
        smeared.push(acc / norm);
    }
    smeared
}
