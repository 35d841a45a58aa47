use std::collections::HashMap;

use crate::config::{BAND_LINEWIDTH, PROJECTION_MARKER_SCALE};
use crate::electronic_structure::{BandStructure, OrbitalType, Spin};
use crate::figure::{Color, Composite, Figure, ScatterSeries, SegmentSeries};
use crate::plotter::bands::{spin_color, spin_style, BandsPlotter};
use crate::EsPlotError;
use crate::Result;

/// Element/orbital selection, e.g. `[("Cu", [D, S]), ("O", [P])]`.
pub type Selection = [(String, Vec<OrbitalType>)];

/// Per-branch regrouped projection weights: one entry per branch, each
/// `spin -> [band][kpoint-in-branch]` of element/orbital weight maps.
pub type BranchProjections =
    Vec<HashMap<Spin, Vec<Vec<HashMap<String, HashMap<OrbitalType, f64>>>>>>;

/// Builds projection-weighted band figures. Requires a band structure that
/// carries orbital projections.
#[derive(Debug, Clone)]
pub struct ProjectedBandsPlotter<'a> {
    bs: &'a BandStructure,
    base: BandsPlotter<'a>,
}

impl<'a> ProjectedBandsPlotter<'a> {
    pub fn new(bs: &'a BandStructure) -> Result<Self> {
        if !bs.has_projections() {
            return Err(EsPlotError::MissingProjections);
        }
        Ok(Self {
            bs,
            base: BandsPlotter::new(bs),
        })
    }

    /// Regroup the selected projection weights branch by branch.
    pub fn projections_by_branches(&self, selection: &Selection) -> BranchProjections {
        let filtered = self.bs.projections_on_elements_and_orbitals(selection);
        self.bs
            .branches
            .iter()
            .map(|branch| {
                filtered
                    .iter()
                    .map(|(&spin, per_band)| {
                        let sliced = per_band
                            .iter()
                            .map(|per_kpoint| {
                                per_kpoint[branch.start_index..=branch.end_index].to_vec()
                            })
                            .collect();
                        (spin, sliced)
                    })
                    .collect()
            })
            .collect()
    }

    /// One panel per selected (element, orbital) pair: the plain band
    /// diagram plus markers sized by the projection weight.
    pub fn projected_plots_dots(
        &self,
        selection: &Selection,
        zero_to_efermi: bool,
        ylim: Option<(f64, f64)>,
    ) -> Composite {
        let by_branch = self.projections_by_branches(selection);
        let data = self.base.bs_plot_data(zero_to_efermi);

        let mut panels = Vec::new();
        for (element, orbitals) in selection {
            for &orbital in orbitals {
                let mut figure = self
                    .base
                    .get_plot(zero_to_efermi, ylim, false, false, None)
                    .with_title(format!("{element} {orbital}"));

                for (branch_idx, proj) in by_branch.iter().enumerate() {
                    let dist = &data.distances[branch_idx];
                    for spin in Spin::BOTH {
                        let (Some(bands), Some(weights)) =
                            (data.energies[branch_idx].get(&spin), proj.get(&spin))
                        else {
                            continue;
                        };
                        for (band, band_weights) in bands.iter().zip(weights) {
                            let sizes: Vec<f64> = band_weights
                                .iter()
                                .map(|by_element| {
                                    let w = by_element
                                        .get(element.as_str())
                                        .and_then(|m| m.get(&orbital))
                                        .copied()
                                        .unwrap_or(0.0);
                                    w * PROJECTION_MARKER_SCALE
                                })
                                .collect();
                            figure.add_scatter(ScatterSeries::new(
                                dist.clone(),
                                band.clone(),
                                sizes,
                                spin_color(spin),
                            ));
                        }
                    }
                }
                panels.push(figure);
            }
        }

        let n = panels.len();
        Composite::new(panels, vec![1.0; n])
    }

    /// One panel per projected element, markers sized by the weight summed
    /// over all orbital characters.
    pub fn element_projected_plots(
        &self,
        zero_to_efermi: bool,
        ylim: Option<(f64, f64)>,
    ) -> Composite {
        let summed = self.bs.projection_on_elements();
        let data = self.base.bs_plot_data(zero_to_efermi);

        let mut panels = Vec::new();
        for element in self.bs.projected_elements() {
            let mut figure = self
                .base
                .get_plot(zero_to_efermi, ylim, false, false, None)
                .with_title(element.clone());

            for (branch_idx, branch) in self.bs.branches.iter().enumerate() {
                let dist = &data.distances[branch_idx];
                for spin in Spin::BOTH {
                    let (Some(bands), Some(weights)) =
                        (data.energies[branch_idx].get(&spin), summed.get(&spin))
                    else {
                        continue;
                    };
                    for (band, band_weights) in bands.iter().zip(weights) {
                        let sizes: Vec<f64> = band_weights
                            [branch.start_index..=branch.end_index]
                            .iter()
                            .map(|by_element| {
                                by_element.get(&element).copied().unwrap_or(0.0)
                                    * PROJECTION_MARKER_SCALE
                            })
                            .collect();
                        figure.add_scatter(ScatterSeries::new(
                            dist.clone(),
                            band.clone(),
                            sizes,
                            spin_color(spin),
                        ));
                    }
                }
            }
            panels.push(figure);
        }

        let n = panels.len();
        Composite::new(panels, vec![1.0; n])
    }

    /// Single panel with each band segment colored by the RGB blend of the
    /// per-element weights at its endpoints. Handles up to three elements;
    /// two elements occupy the red and blue channels.
    pub fn element_projected_plots_color(
        &self,
        elt_ordered: Option<Vec<String>>,
        zero_to_efermi: bool,
        ylim: Option<(f64, f64)>,
    ) -> Result<Figure> {
        let elements = elt_ordered.unwrap_or_else(|| self.bs.projected_elements());
        if elements.len() > 3 {
            return Err(EsPlotError::TooManyElements(elements.len()));
        }

        let summed = self.bs.projection_on_elements();
        let data = self.base.bs_plot_data(zero_to_efermi);

        // Start from the plain diagram for ticks, limits, and the Fermi
        // line, then paint the colored segments over the spin-color bands.
        let mut figure = self.base.get_plot(zero_to_efermi, ylim, false, false, None);
        figure.title = Some(elements.join(" / "));

        for (branch_idx, branch) in self.bs.branches.iter().enumerate() {
            let dist = &data.distances[branch_idx];
            for spin in Spin::BOTH {
                let (Some(bands), Some(weights)) =
                    (data.energies[branch_idx].get(&spin), summed.get(&spin))
                else {
                    continue;
                };
                for (band, band_weights) in bands.iter().zip(weights) {
                    let mut segments = Vec::with_capacity(dist.len().saturating_sub(1));
                    let mut colors = Vec::with_capacity(dist.len().saturating_sub(1));
                    for j in 0..dist.len().saturating_sub(1) {
                        segments.push(((dist[j], band[j]), (dist[j + 1], band[j + 1])));

                        // Each segment takes the color of its left endpoint
                        let k0 = branch.start_index + j;
                        let left_weights: Vec<f64> = elements
                            .iter()
                            .map(|el| band_weights[k0].get(el).copied().unwrap_or(0.0))
                            .collect();
                        colors.push(rgb_blend(&left_weights));
                    }
                    figure.add_segments(
                        SegmentSeries::new(segments, colors, BAND_LINEWIDTH)
                            .with_style(spin_style(spin)),
                    );
                }
            }
        }

        Ok(figure)
    }
}

/// Blend element weights into an RGB color, normalized by their sum.
/// Zero total weight maps to black; two weights use the (R, B) channels.
pub(crate) fn rgb_blend(weights: &[f64]) -> Color {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return Color::BLACK;
    }
    let channel = |i: usize| weights.get(i).copied().unwrap_or(0.0) / sum;
    match weights.len() {
        2 => Color::new(channel(0), 0.0, channel(1)),
        _ => Color::new(channel(0), channel(1), channel(2)),
    }
}
