use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::electronic_structure::core::{OrbitalType, Spin};
use crate::error::EsPlotError;
use crate::lattice::Lattice;
use crate::Result;

/// A k-point on the band-structure path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpoint {
    /// Fractional coordinates of the reciprocal lattice
    pub frac_coords: Vector3<f64>,
    /// Cartesian coordinates (Å⁻¹)
    pub cart_coords: Vector3<f64>,
    /// High-symmetry label, if this point carries one (e.g. "\\Gamma", "X")
    pub label: Option<String>,
}

/// A contiguous segment of the k-path between two labeled points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    /// Segment name "A-B" built from the endpoint labels
    pub name: String,
    pub start_index: usize,
    pub end_index: usize,
}

/// Projection weights per spin: `[band][kpoint]` maps of
/// element symbol -> orbital character -> weight.
pub type Projections = HashMap<Spin, Vec<Vec<HashMap<String, HashMap<OrbitalType, f64>>>>>;

/// A band edge (VBM or CBM).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandEdge {
    /// Edge energy (absolute, eV)
    pub energy: f64,
    /// All k-point indices attaining the edge energy
    pub kpoint_indices: Vec<usize>,
    /// Label of the first attaining k-point, if it has one
    pub label: Option<String>,
}

/// Band gap summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandGap {
    /// Gap energy (eV); 0 for metals
    pub energy: f64,
    /// Transition description, e.g. "\\Gamma-X"
    pub transition: String,
    pub direct: bool,
}

/// A band structure computed along symmetry lines of the Brillouin zone.
///
/// The cumulative arc-length coordinate `distance` is the x-axis of every
/// band plot: it is accumulated by walking the cartesian k-path, except that
/// two consecutive labeled k-points (a branch join, possibly discontinuous
/// like "X|M") contribute a zero-length step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandStructure {
    pub kpoints: Vec<Kpoint>,
    /// Cumulative arc length per k-point
    pub distance: Vec<f64>,
    pub branches: Vec<Branch>,
    /// Band energies per spin: `[band][kpoint]`, absolute eV
    pub bands: HashMap<Spin, Vec<Vec<f64>>>,
    pub efermi: f64,
    /// Reciprocal lattice of the structure
    pub lattice_rec: Lattice,
    /// Orbital/element projections; empty when the calculation had none
    pub projections: Projections,
}

impl BandStructure {
    /// Build a symmetry-line band structure from fractional k-points.
    ///
    /// Branch boundaries are detected from labels: a branch ends where a
    /// labeled k-point is immediately followed by another labeled k-point.
    pub fn new(
        lattice_rec: Lattice,
        kpoints: Vec<(Vector3<f64>, Option<String>)>,
        bands: HashMap<Spin, Vec<Vec<f64>>>,
        efermi: f64,
        projections: Projections,
    ) -> Result<Self> {
        if kpoints.is_empty() {
            return Err(EsPlotError::EmptyData("band structure k-points"));
        }
        let n_kpoints = kpoints.len();
        for spin_bands in bands.values() {
            for band in spin_bands {
                if band.len() != n_kpoints {
                    return Err(EsPlotError::LengthMismatch {
                        context: "band energies vs k-points",
                        left: band.len(),
                        right: n_kpoints,
                    });
                }
            }
        }

        let kpoints: Vec<Kpoint> = kpoints
            .into_iter()
            .map(|(frac, label)| Kpoint {
                cart_coords: lattice_rec.frac_to_cart(frac),
                frac_coords: frac,
                label,
            })
            .collect();

        let distance = cumulative_distances(&kpoints);
        let branches = detect_branches(&kpoints)?;

        Ok(Self {
            kpoints,
            distance,
            branches,
            bands,
            efermi,
            lattice_rec,
            projections,
        })
    }

    /// Number of bands (assumed equal across spins).
    pub fn nb_bands(&self) -> usize {
        self.bands.values().map(|b| b.len()).next().unwrap_or(0)
    }

    pub fn is_spin_polarized(&self) -> bool {
        self.bands.contains_key(&Spin::Down)
    }

    pub fn has_projections(&self) -> bool {
        !self.projections.is_empty()
    }

    /// True if at least one band crosses the Fermi level.
    pub fn is_metal(&self) -> bool {
        for spin_bands in self.bands.values() {
            for band in spin_bands {
                let min = band.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = band.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                if min < self.efermi && self.efermi < max {
                    return true;
                }
            }
        }
        false
    }

    /// Valence band maximum: the highest eigenvalue not above the Fermi level.
    /// Returns `None` for metals.
    pub fn vbm(&self) -> Option<BandEdge> {
        self.band_edge(|e, efermi| e <= efermi, f64::NEG_INFINITY, f64::max)
    }

    /// Conduction band minimum: the lowest eigenvalue above the Fermi level.
    /// Returns `None` for metals.
    pub fn cbm(&self) -> Option<BandEdge> {
        self.band_edge(|e, efermi| e > efermi, f64::INFINITY, f64::min)
    }

    fn band_edge(
        &self,
        side: impl Fn(f64, f64) -> bool,
        init: f64,
        pick: impl Fn(f64, f64) -> f64,
    ) -> Option<BandEdge> {
        if self.is_metal() {
            return None;
        }
        let mut edge = init;
        for spin_bands in self.bands.values() {
            for band in spin_bands {
                for &e in band {
                    if side(e, self.efermi) {
                        edge = pick(edge, e);
                    }
                }
            }
        }
        if !edge.is_finite() {
            return None;
        }

        // All k-point indices attaining the edge energy (any spin, any band).
        let mut indices = Vec::new();
        for spin_bands in self.bands.values() {
            for band in spin_bands {
                for (k_idx, &e) in band.iter().enumerate() {
                    if (e - edge).abs() < 1e-8 && !indices.contains(&k_idx) {
                        indices.push(k_idx);
                    }
                }
            }
        }
        indices.sort_unstable();
        let label = indices
            .first()
            .and_then(|&i| self.kpoints[i].label.clone());
        Some(BandEdge {
            energy: edge,
            kpoint_indices: indices,
            label,
        })
    }

    /// Band gap summary; zero-gap for metals.
    pub fn band_gap(&self) -> BandGap {
        let (vbm, cbm) = match (self.vbm(), self.cbm()) {
            (Some(v), Some(c)) => (v, c),
            _ => {
                return BandGap {
                    energy: 0.0,
                    transition: String::new(),
                    direct: false,
                }
            }
        };

        let direct = vbm
            .kpoint_indices
            .iter()
            .any(|i| cbm.kpoint_indices.contains(i));
        let transition = format!(
            "{}-{}",
            edge_site_name(self, &vbm),
            edge_site_name(self, &cbm)
        );
        BandGap {
            energy: cbm.energy - vbm.energy,
            transition,
            direct,
        }
    }

    /// Projection weights summed over all orbital characters, per element:
    /// per spin, `[band][kpoint]` maps of element -> weight.
    pub fn projection_on_elements(&self) -> HashMap<Spin, Vec<Vec<HashMap<String, f64>>>> {
        self.projections
            .iter()
            .map(|(&spin, per_band)| {
                let summed = per_band
                    .iter()
                    .map(|per_kpoint| {
                        per_kpoint
                            .iter()
                            .map(|by_element| {
                                by_element
                                    .iter()
                                    .map(|(el, by_orbital)| {
                                        (el.clone(), by_orbital.values().sum::<f64>())
                                    })
                                    .collect()
                            })
                            .collect()
                    })
                    .collect();
                (spin, summed)
            })
            .collect()
    }

    /// Projection weights restricted to an element/orbital selection,
    /// e.g. `[("Cu", [D, S]), ("O", [P])]`.
    pub fn projections_on_elements_and_orbitals(
        &self,
        selection: &[(String, Vec<OrbitalType>)],
    ) -> Projections {
        self.projections
            .iter()
            .map(|(&spin, per_band)| {
                let filtered = per_band
                    .iter()
                    .map(|per_kpoint| {
                        per_kpoint
                            .iter()
                            .map(|by_element| {
                                selection
                                    .iter()
                                    .map(|(el, orbitals)| {
                                        let weights = orbitals
                                            .iter()
                                            .map(|&o| {
                                                let w = by_element
                                                    .get(el)
                                                    .and_then(|m| m.get(&o))
                                                    .copied()
                                                    .unwrap_or(0.0);
                                                (o, w)
                                            })
                                            .collect();
                                        (el.clone(), weights)
                                    })
                                    .collect()
                            })
                            .collect()
                    })
                    .collect();
                (spin, filtered)
            })
            .collect()
    }

    /// Element symbols occurring in the projections, in sorted order.
    pub fn projected_elements(&self) -> Vec<String> {
        let mut elements: Vec<String> = Vec::new();
        for per_band in self.projections.values() {
            for per_kpoint in per_band {
                for by_element in per_kpoint {
                    for el in by_element.keys() {
                        if !elements.iter().any(|e| e == el) {
                            elements.push(el.clone());
                        }
                    }
                }
            }
        }
        elements.sort();
        elements
    }
}

fn edge_site_name(bs: &BandStructure, edge: &BandEdge) -> String {
    match &edge.label {
        Some(label) => label.clone(),
        None => {
            let k = edge
                .kpoint_indices
                .first()
                .map(|&i| bs.kpoints[i].frac_coords)
                .unwrap_or_else(Vector3::zeros);
            format!("({:.3},{:.3},{:.3})", k.x, k.y, k.z)
        }
    }
}

/// Cumulative arc length along the cartesian k-path. Consecutive labeled
/// points (branch joins) contribute a zero step even when their coordinates
/// differ (discontinuous jumps like "X|M").
fn cumulative_distances(kpoints: &[Kpoint]) -> Vec<f64> {
    let mut distance = Vec::with_capacity(kpoints.len());
    let mut total = 0.0;
    distance.push(0.0);
    for i in 1..kpoints.len() {
        let joins_branches = kpoints[i].label.is_some() && kpoints[i - 1].label.is_some();
        if !joins_branches {
            total += (kpoints[i].cart_coords - kpoints[i - 1].cart_coords).norm();
        }
        distance.push(total);
    }
    distance
}

/// Split the path into branches at consecutive labeled k-points.
fn detect_branches(kpoints: &[Kpoint]) -> Result<Vec<Branch>> {
    let endpoints_labeled = kpoints.first().is_some_and(|k| k.label.is_some())
        && kpoints.last().is_some_and(|k| k.label.is_some());
    if !endpoints_labeled {
        return Err(EsPlotError::NotSymmLine);
    }

    let mut branches = Vec::new();
    let mut start = 0;
    for i in 0..kpoints.len() - 1 {
        if kpoints[i].label.is_some() && kpoints[i + 1].label.is_some() {
            branches.push(make_branch(kpoints, start, i));
            start = i + 1;
        }
    }
    branches.push(make_branch(kpoints, start, kpoints.len() - 1));
    Ok(branches)
}

fn make_branch(kpoints: &[Kpoint], start: usize, end: usize) -> Branch {
    let start_label = kpoints[start].label.as_deref().unwrap_or("?");
    let end_label = kpoints[end].label.as_deref().unwrap_or("?");
    Branch {
        name: format!("{start_label}-{end_label}"),
        start_index: start,
        end_index: end,
    }
}
