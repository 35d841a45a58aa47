use std::collections::HashMap;

use log::{debug, warn};

use crate::config::{
    BAND_LINEWIDTH, FERMI_LINEWIDTH, INSULATOR_ENERGY_WINDOW, METAL_ENERGY_WINDOW,
    SPLINE_RESOLUTION, SYMMETRY_LINEWIDTH,
};
use crate::electronic_structure::{BandStructure, Spin};
use crate::figure::{Color, Figure, LineSeries, LineStyle, ScatterSeries, TickSet};
use crate::lattice::Lattice;
use crate::plotter::brillouin;
use crate::plotter::spline::CubicSpline;
use crate::Result;

/// Band energies rearranged for plotting, one outer index per branch.
#[derive(Debug, Clone)]
pub struct BandsPlotData {
    /// x-coordinates per branch
    pub distances: Vec<Vec<f64>>,
    /// Per branch: spin -> `[band][kpoint-in-branch]`, shifted by `zero_energy`
    pub energies: Vec<HashMap<Spin, Vec<Vec<f64>>>>,
    /// VBM marker coordinates (distance, shifted energy)
    pub vbm: Vec<(f64, f64)>,
    /// CBM marker coordinates (distance, shifted energy)
    pub cbm: Vec<(f64, f64)>,
    /// Energy subtracted from every eigenvalue (0 when unshifted)
    pub zero_energy: f64,
    /// Band gap summary, empty for metals
    pub band_gap: String,
    pub is_metal: bool,
    pub lattice: Lattice,
}

/// Builds band-diagram figures from a symmetry-line band structure.
///
/// Spin-up bands are drawn blue and solid, spin-down red and dashed.
#[derive(Debug, Clone)]
pub struct BandsPlotter<'a> {
    bs: &'a BandStructure,
}

impl<'a> BandsPlotter<'a> {
    pub fn new(bs: &'a BandStructure) -> Self {
        Self { bs }
    }

    /// Rearrange the band energies branch by branch.
    ///
    /// With `zero_to_efermi` the energies are shifted so zero sits at the
    /// Fermi level for metals and at the VBM otherwise.
    pub fn bs_plot_data(&self, zero_to_efermi: bool) -> BandsPlotData {
        let bs = self.bs;
        let is_metal = bs.is_metal();
        let vbm = bs.vbm();
        let cbm = bs.cbm();

        let zero_energy = if !zero_to_efermi {
            0.0
        } else if is_metal {
            bs.efermi
        } else {
            vbm.as_ref().map(|v| v.energy).unwrap_or(bs.efermi)
        };

        let mut distances = Vec::with_capacity(bs.branches.len());
        let mut energies = Vec::with_capacity(bs.branches.len());
        for branch in &bs.branches {
            let range = branch.start_index..=branch.end_index;
            distances.push(bs.distance[range.clone()].to_vec());

            let mut per_spin: HashMap<Spin, Vec<Vec<f64>>> = HashMap::new();
            for (&spin, bands) in &bs.bands {
                let shifted = bands
                    .iter()
                    .map(|band| band[range.clone()].iter().map(|e| e - zero_energy).collect())
                    .collect();
                per_spin.insert(spin, shifted);
            }
            energies.push(per_spin);
        }

        let edge_markers = |edge: &Option<crate::electronic_structure::BandEdge>| match edge {
            Some(edge) => edge
                .kpoint_indices
                .iter()
                .map(|&i| (bs.distance[i], edge.energy - zero_energy))
                .collect(),
            None => Vec::new(),
        };

        let band_gap = if is_metal {
            String::new()
        } else {
            let gap = bs.band_gap();
            let kind = if gap.direct { "Direct" } else { "Indirect" };
            format!("{} {} bandgap = {:.4} eV", kind, gap.transition, gap.energy)
        };

        BandsPlotData {
            distances,
            energies,
            vbm: edge_markers(&vbm),
            cbm: edge_markers(&cbm),
            zero_energy,
            band_gap,
            is_metal,
            lattice: bs.lattice_rec.clone(),
        }
    }

    /// Tick positions and labels from the labeled k-points.
    ///
    /// At a branch boundary where the label changes, the previous tick is
    /// replaced by the merged "A|B" form at the boundary distance.
    pub fn get_ticks(&self) -> TickSet {
        let bs = self.bs;
        let mut positions: Vec<f64> = Vec::new();
        let mut labels: Vec<String> = Vec::new();

        let mut previous_label: Option<&str> = None;
        let mut previous_branch: Option<usize> = None;
        for (idx, kpoint) in bs.kpoints.iter().enumerate() {
            let Some(label) = kpoint.label.as_deref() else {
                continue;
            };
            let branch = bs
                .branches
                .iter()
                .position(|b| b.start_index <= idx && idx <= b.end_index);

            let label_changed = previous_label.is_some_and(|p| p != label);
            let branch_changed = previous_branch.is_some() && previous_branch != branch;
            if label_changed && branch_changed {
                // A jump in the path: replace the previous tick with the
                // merged pair.
                let merged = format!(
                    "{}|{}",
                    latexify(previous_label.unwrap_or_default()),
                    latexify(label)
                );
                positions.pop();
                labels.pop();
                positions.push(bs.distance[idx]);
                labels.push(merged);
            } else {
                positions.push(bs.distance[idx]);
                labels.push(latexify(label));
            }
            previous_label = Some(label);
            previous_branch = branch;
        }

        TickSet::new(positions, labels)
    }

    /// Build the band diagram.
    ///
    /// `smooth` resamples each band per branch through a cubic spline;
    /// `smooth_tol` is reported in the fallback warning when a branch
    /// cannot be interpolated; `vbm_cbm_marker` adds green/red edge markers.
    pub fn get_plot(
        &self,
        zero_to_efermi: bool,
        ylim: Option<(f64, f64)>,
        smooth: bool,
        vbm_cbm_marker: bool,
        smooth_tol: Option<f64>,
    ) -> Figure {
        let data = self.bs_plot_data(zero_to_efermi);
        let mut figure = Figure::new().with_labels(
            "Wave Vector",
            if zero_to_efermi {
                "E - E_f (eV)"
            } else {
                "Energy (eV)"
            },
        );

        for (branch_idx, (dist, per_spin)) in
            data.distances.iter().zip(&data.energies).enumerate()
        {
            for spin in Spin::BOTH {
                let Some(bands) = per_spin.get(&spin) else {
                    continue;
                };
                for (band_idx, band) in bands.iter().enumerate() {
                    let (x, y) = if smooth {
                        resample_band(dist, band, branch_idx, band_idx, smooth_tol)
                    } else {
                        (dist.clone(), band.clone())
                    };
                    figure.add_line(
                        LineSeries::new(x, y)
                            .with_color(spin_color(spin))
                            .with_width(BAND_LINEWIDTH)
                            .with_style(spin_style(spin)),
                    );
                }
            }
        }

        self.apply_ticks(&mut figure);

        if let Some(&x_max) = self.bs.distance.last() {
            figure.x_limits = Some((0.0, x_max));
        }
        figure.y_limits =
            ylim.or_else(|| default_energy_window(&data, zero_to_efermi, self.bs.efermi));

        if vbm_cbm_marker {
            add_edge_markers(&mut figure, &data.vbm, Color::GREEN);
            add_edge_markers(&mut figure, &data.cbm, Color::RED);
        }

        if !zero_to_efermi {
            figure.add_hline(
                self.bs.efermi,
                Color::BLACK,
                FERMI_LINEWIDTH,
                LineStyle::Dashed,
            );
        }

        figure
    }

    /// Overlay a second band structure in red on this one.
    ///
    /// The overlay reuses this plotter's distances, so both band structures
    /// must share the same branch layout.
    pub fn plot_compare(&self, other: &BandStructure, zero_to_efermi: bool) -> Result<Figure> {
        let data_self = self.bs_plot_data(zero_to_efermi);
        let data_other = BandsPlotter::new(other).bs_plot_data(zero_to_efermi);
        if data_self.distances.len() != data_other.distances.len() {
            return Err(crate::EsPlotError::LengthMismatch {
                context: "band structure branches in comparison",
                left: data_self.distances.len(),
                right: data_other.distances.len(),
            });
        }

        let mut figure = self.get_plot(zero_to_efermi, None, false, false, None);
        for (dist, per_spin) in data_self.distances.iter().zip(&data_other.energies) {
            for spin in Spin::BOTH {
                let Some(bands) = per_spin.get(&spin) else {
                    continue;
                };
                for band in bands {
                    if band.len() != dist.len() {
                        return Err(crate::EsPlotError::LengthMismatch {
                            context: "band structure k-points in comparison",
                            left: band.len(),
                            right: dist.len(),
                        });
                    }
                    figure.add_line(
                        LineSeries::new(dist.clone(), band.clone())
                            .with_color(Color::RED)
                            .with_width(BAND_LINEWIDTH)
                            .with_style(spin_style(spin)),
                    );
                }
            }
        }
        Ok(figure)
    }

    /// The Brillouin zone of this band structure with its k-path overlay.
    pub fn plot_brillouin(&self) -> Result<crate::figure::Scene3> {
        let bs = self.bs;
        let mut labels = Vec::new();
        for kpoint in &bs.kpoints {
            if let Some(label) = &kpoint.label {
                if !labels.iter().any(|(l, _)| l == label) {
                    labels.push((label.clone(), kpoint.frac_coords));
                }
            }
        }
        let lines: Vec<[nalgebra::Vector3<f64>; 2]> = bs
            .branches
            .iter()
            .map(|b| {
                [
                    bs.kpoints[b.start_index].frac_coords,
                    bs.kpoints[b.end_index].frac_coords,
                ]
            })
            .collect();

        brillouin::plot_brillouin_zone(&bs.lattice_rec, &lines, &labels, &[], false)
    }

    /// Attach sanitized ticks and draw a vertical line at each retained one.
    pub(crate) fn apply_ticks(&self, figure: &mut Figure) {
        let ticks = self.get_ticks();
        let mut positions = Vec::with_capacity(ticks.positions.len());
        let mut labels = Vec::with_capacity(ticks.labels.len());
        for (pos, label) in ticks.positions.iter().zip(&ticks.labels) {
            if labels.last() == Some(label) {
                debug!("skipping duplicate tick label {label} at distance {pos}");
                continue;
            }
            debug!("adding tick {label} at distance {pos}");
            positions.push(*pos);
            labels.push(label.clone());
        }
        for &pos in &positions {
            figure.add_vline(pos, Color::BLACK, SYMMETRY_LINEWIDTH, LineStyle::Solid);
        }
        figure.x_ticks = Some(TickSet::new(positions, labels));
    }
}

/// Wrap TeX-ish labels ("\\Gamma", "K_1") in math-mode delimiters.
pub(crate) fn latexify(label: &str) -> String {
    if label.starts_with('\\') || label.contains('_') {
        format!("${label}$")
    } else {
        label.to_string()
    }
}

pub(crate) fn spin_color(spin: Spin) -> Color {
    match spin {
        Spin::Up => Color::BLUE,
        Spin::Down => Color::RED,
    }
}

pub(crate) fn spin_style(spin: Spin) -> LineStyle {
    match spin {
        Spin::Up => LineStyle::Solid,
        Spin::Down => LineStyle::Dashed,
    }
}

/// Spline-resample one band over one branch, falling back to the raw points
/// when the branch cannot be interpolated.
fn resample_band(
    dist: &[f64],
    band: &[f64],
    branch_idx: usize,
    band_idx: usize,
    smooth_tol: Option<f64>,
) -> (Vec<f64>, Vec<f64>) {
    let tol = smooth_tol.unwrap_or(0.0);
    let Some(spline) = CubicSpline::fit(dist, band) else {
        warn!("branch {branch_idx}, band {band_idx} cannot be interpolated, using raw points");
        return (dist.to_vec(), band.to_vec());
    };

    let (start, end) = (dist[0], dist[dist.len() - 1]);
    let n = SPLINE_RESOLUTION;
    let xs: Vec<f64> = (0..n)
        .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
        .collect();
    let ys: Vec<f64> = xs.iter().map(|&x| spline.evaluate(x)).collect();
    if ys.iter().any(|y| !y.is_finite()) {
        warn!(
            "spline produced non-finite values on branch {branch_idx}, band {band_idx}; \
             current smooth_tol is {tol}, try increasing it. Using raw points"
        );
        return (dist.to_vec(), band.to_vec());
    }
    (xs, ys)
}

/// Default y-window: around zero for metals, around the gap edges otherwise.
fn default_energy_window(
    data: &BandsPlotData,
    zero_to_efermi: bool,
    efermi: f64,
) -> Option<(f64, f64)> {
    if data.is_metal {
        let center = if zero_to_efermi { 0.0 } else { efermi };
        Some((
            center + METAL_ENERGY_WINDOW.0,
            center + METAL_ENERGY_WINDOW.1,
        ))
    } else {
        let vbm = data.vbm.first().map(|&(_, e)| e)?;
        let cbm = data.cbm.first().map(|&(_, e)| e)?;
        Some((
            vbm + INSULATOR_ENERGY_WINDOW.0,
            cbm + INSULATOR_ENERGY_WINDOW.1,
        ))
    }
}

fn add_edge_markers(figure: &mut Figure, markers: &[(f64, f64)], color: Color) {
    if markers.is_empty() {
        return;
    }
    let (x, y): (Vec<f64>, Vec<f64>) = markers.iter().copied().unzip();
    let sizes = vec![10.0; x.len()];
    figure.add_scatter(ScatterSeries::new(x, y, sizes, color));
}
