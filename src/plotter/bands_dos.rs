use std::collections::HashMap;

use crate::config::{BAND_LINEWIDTH, DOS_LINEWIDTH, FERMI_LINEWIDTH, SYMMETRY_LINEWIDTH};
use crate::electronic_structure::{BandStructure, CompleteDos, Spin};
use crate::figure::{
    AreaSeries, Color, Composite, Figure, LegendEntry, LineSeries, LineStyle, SegmentSeries,
    SeriesKind, TickSet,
};
use crate::plotter::bands::latexify;
use crate::Result;

/// What the band panel colors encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandProjection {
    /// Blend per-element weights into segment colors
    #[default]
    Elements,
    /// Plain spin coloring
    None,
}

/// What the DOS panel breaks the total density into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DosProjection {
    #[default]
    Elements,
    Orbitals,
    None,
}

/// Builds an aligned bands + DOS composite: band diagram on the left
/// (double width), densities on the right sharing the energy axis.
///
/// Energies are always shifted so zero sits at the VBM (or E_F for metals).
#[derive(Debug, Clone)]
pub struct BandsDosPlotter {
    pub bs_projection: BandProjection,
    pub dos_projection: DosProjection,
    /// Energy window below the VBM (positive eV)
    pub vb_energy_range: f64,
    /// Energy window above the CBM (positive eV)
    pub cb_energy_range: f64,
    /// Measure the upper window from zero instead of the CBM
    pub fixed_cb_energy: bool,
    /// Spacing of the energy tick grid (eV)
    pub egrid_interval: f64,
    pub axis_fontsize: f64,
    pub bs_legend: bool,
    pub dos_legend: bool,
}

impl Default for BandsDosPlotter {
    fn default() -> Self {
        Self {
            bs_projection: BandProjection::Elements,
            dos_projection: DosProjection::Elements,
            vb_energy_range: 4.0,
            cb_energy_range: 4.0,
            fixed_cb_energy: false,
            egrid_interval: 1.0,
            axis_fontsize: 20.0,
            bs_legend: true,
            dos_legend: true,
        }
    }
}

/// The channel colors assigned to up to three projected elements, in
/// blue, red, green preference order.
const ELEMENT_COLORS: [Color; 3] = [Color::BLUE, Color::RED, Color::GREEN];

impl BandsDosPlotter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the composite. Without a DOS the result holds only the band
    /// panel.
    pub fn get_plot(&self, bs: &BandStructure, dos: Option<&CompleteDos>) -> Result<Composite> {
        let zero_energy = if bs.is_metal() {
            bs.efermi
        } else {
            bs.vbm().map(|v| v.energy).unwrap_or(bs.efermi)
        };

        let emin = -self.vb_energy_range;
        let emax = if bs.is_metal() || self.fixed_cb_energy {
            self.cb_energy_range
        } else {
            let gap = bs.band_gap().energy;
            gap + self.cb_energy_range
        };
        let energy_ticks = self.energy_tick_grid(emin, emax);

        let bands_panel = self.bands_panel(bs, zero_energy, (emin, emax), &energy_ticks)?;

        let mut panels = vec![bands_panel];
        let mut ratios = vec![2.0];
        if let Some(dos) = dos {
            panels.push(self.dos_panel(dos, (emin, emax), &energy_ticks));
            ratios.push(1.0);
        }
        Ok(Composite::new(panels, ratios))
    }

    // ======================== BAND PANEL ========================

    fn bands_panel(
        &self,
        bs: &BandStructure,
        zero_energy: f64,
        elim: (f64, f64),
        energy_ticks: &TickSet,
    ) -> Result<Figure> {
        let mut figure = Figure::new()
            .with_labels("Wavevector", "E - E_F (eV)")
            .with_y_limits(elim)
            .with_y_ticks(energy_ticks.clone())
            .with_font_size(self.axis_fontsize);

        let elements = projected_element_order(bs);
        let colordata = self.band_colors(bs, &elements);

        for (&spin, bands) in &bs.bands {
            for (band_idx, band) in bands.iter().enumerate() {
                let mut segments = Vec::with_capacity(band.len().saturating_sub(1));
                let mut colors = Vec::with_capacity(band.len().saturating_sub(1));
                for k in 0..band.len().saturating_sub(1) {
                    segments.push((
                        (bs.distance[k], band[k] - zero_energy),
                        (bs.distance[k + 1], band[k + 1] - zero_energy),
                    ));
                    // Segment color averages the endpoint colors
                    let c0 = point_color(&colordata, spin, band_idx, k);
                    let c1 = point_color(&colordata, spin, band_idx, k + 1);
                    colors.push(c0.average(c1));
                }
                figure.add_segments(
                    SegmentSeries::new(segments, colors, BAND_LINEWIDTH).with_style(
                        match spin {
                            Spin::Up => LineStyle::Solid,
                            Spin::Down => LineStyle::Dotted,
                        },
                    ),
                );
            }
        }

        let ticks = branch_endpoint_ticks(bs);
        for &pos in &ticks.positions {
            figure.add_vline(pos, Color::BLACK, SYMMETRY_LINEWIDTH, LineStyle::Solid);
        }
        figure.x_ticks = Some(ticks);
        if let Some(&x_max) = bs.distance.last() {
            figure.x_limits = Some((0.0, x_max));
        }
        figure.add_hline(0.0, Color::BLACK, FERMI_LINEWIDTH, LineStyle::Dashed);

        if self.bs_legend {
            figure.legend = self.band_legend(bs, &elements);
        }
        Ok(figure)
    }

    /// Per-point band colors, or None when unprojected (spin coloring).
    #[allow(clippy::type_complexity)]
    fn band_colors(
        &self,
        bs: &BandStructure,
        elements: &[String],
    ) -> Option<HashMap<Spin, Vec<Vec<Color>>>> {
        if self.bs_projection == BandProjection::None || !bs.has_projections() {
            return None;
        }

        let projections = bs.projection_on_elements();
        let mut out = HashMap::new();
        for (&spin, per_band) in &projections {
            let colored = per_band
                .iter()
                .map(|per_kpoint| {
                    per_kpoint
                        .iter()
                        .map(|by_element| element_blend(by_element, elements))
                        .collect()
                })
                .collect();
            out.insert(spin, colored);
        }
        Some(out)
    }

    fn band_legend(&self, bs: &BandStructure, elements: &[String]) -> Vec<LegendEntry> {
        if self.bs_projection == BandProjection::Elements && bs.has_projections() {
            elements
                .iter()
                .zip(ELEMENT_COLORS)
                .map(|(el, color)| LegendEntry {
                    label: el.clone(),
                    color,
                    kind: SeriesKind::Line,
                })
                .collect()
        } else if bs.is_spin_polarized() {
            vec![
                LegendEntry {
                    label: "spin up".into(),
                    color: Color::BLACK,
                    kind: SeriesKind::Line,
                },
                LegendEntry {
                    label: "spin down".into(),
                    color: Color::BLUE,
                    kind: SeriesKind::Line,
                },
            ]
        } else {
            Vec::new()
        }
    }

    // ======================== DOS PANEL ========================

    fn dos_panel(&self, dos: &CompleteDos, elim: (f64, f64), energy_ticks: &TickSet) -> Figure {
        let mut figure = Figure::new()
            .with_labels("DOS", "")
            .with_y_limits(elim)
            .with_y_ticks(energy_ticks.clone())
            .with_font_size(self.axis_fontsize);

        let energies: Vec<f64> = dos
            .total
            .energies
            .iter()
            .map(|e| e - dos.total.efermi)
            .collect();

        // Track the largest density inside the energy window for the x-range
        let mut dos_max: f64 = 0.0;
        let mut dos_min: f64 = 0.0;
        let mut note_extent = |x: &[f64], y: &[f64]| {
            for (&xi, &yi) in x.iter().zip(y) {
                if elim.0 <= yi && yi <= elim.1 {
                    dos_max = dos_max.max(xi);
                    dos_min = dos_min.min(xi);
                }
            }
        };

        // Gray total DOS, filled
        for spin in Spin::BOTH {
            let Some(dens) = dos.total.density(spin) else {
                continue;
            };
            let x: Vec<f64> = dens.iter().map(|d| spin.sign() * d).collect();
            note_extent(&x, &energies);
            figure.add_area(AreaSeries::new(
                x.clone(),
                energies.clone(),
                Color::new(0.7, 0.7, 0.7),
            ));
            let mut line = LineSeries::new(x, energies.clone())
                .with_color(Color::new(0.3, 0.3, 0.3))
                .with_width(DOS_LINEWIDTH);
            if spin == Spin::Up {
                line = line.with_label("total");
            }
            figure.add_line(line);
        }

        match self.dos_projection {
            DosProjection::Elements => {
                for (idx, (element, el_dos)) in dos.element_dos().into_iter().enumerate() {
                    let color = ELEMENT_COLORS[idx % ELEMENT_COLORS.len()];
                    add_projected_trace(&mut figure, &element, &el_dos, &energies, color, &mut note_extent);
                }
            }
            DosProjection::Orbitals => {
                for (idx, (orbital, orb_dos)) in dos.spd_dos().into_iter().enumerate() {
                    let color = ELEMENT_COLORS[idx % ELEMENT_COLORS.len()];
                    add_projected_trace(
                        &mut figure,
                        orbital.as_str(),
                        &orb_dos,
                        &energies,
                        color,
                        &mut note_extent,
                    );
                }
            }
            DosProjection::None => {}
        }

        // 5% headroom past the densities visible in the window
        figure.x_limits = Some((1.05 * dos_min, 1.05 * dos_max.max(f64::MIN_POSITIVE)));
        figure.add_hline(0.0, Color::BLACK, FERMI_LINEWIDTH, LineStyle::Dashed);
        if !self.dos_legend {
            figure.legend.clear();
        }
        figure
    }

    fn energy_tick_grid(&self, emin: f64, emax: f64) -> TickSet {
        let mut positions = Vec::new();
        let mut labels = Vec::new();
        let mut e = (emin / self.egrid_interval).ceil() * self.egrid_interval;
        while e <= emax + 1e-9 {
            positions.push(e);
            labels.push(format!("{e:.0}"));
            e += self.egrid_interval;
        }
        TickSet::new(positions, labels)
    }
}

/// Projected elements in their discovery order, capped at the three color
/// channels.
fn projected_element_order(bs: &BandStructure) -> Vec<String> {
    let mut elements = bs.projected_elements();
    elements.truncate(ELEMENT_COLORS.len());
    elements
}

/// Blend per-element weights into a color: weights normalized by their sum,
/// mapped to the blue/red/green channel order.
fn element_blend(by_element: &HashMap<String, f64>, elements: &[String]) -> Color {
    let weights: Vec<f64> = elements
        .iter()
        .map(|el| by_element.get(el).copied().unwrap_or(0.0))
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Color::BLACK;
    }
    let channel = |i: usize| weights.get(i).map_or(0.0, |w| w / total);
    // First element blue, second red, third green
    Color::new(channel(1), channel(2), channel(0))
}

fn point_color(
    colordata: &Option<HashMap<Spin, Vec<Vec<Color>>>>,
    spin: Spin,
    band_idx: usize,
    k_idx: usize,
) -> Color {
    match colordata {
        Some(data) => data
            .get(&spin)
            .and_then(|bands| bands.get(band_idx))
            .and_then(|band| band.get(k_idx))
            .copied()
            .unwrap_or(Color::BLACK),
        None => match spin {
            Spin::Up => Color::BLACK,
            Spin::Down => Color::BLUE,
        },
    }
}

/// k-axis ticks from branch endpoints, merging a disagreeing join into the
/// "A|B" form.
fn branch_endpoint_ticks(bs: &BandStructure) -> TickSet {
    let mut positions = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for branch in &bs.branches {
        let start = bs.kpoints[branch.start_index]
            .label
            .as_deref()
            .unwrap_or_default();
        let end = bs.kpoints[branch.end_index]
            .label
            .as_deref()
            .unwrap_or_default();

        match labels.last_mut() {
            None => {
                positions.push(bs.distance[branch.start_index]);
                labels.push(latexify(start));
            }
            Some(previous) => {
                let start_tex = latexify(start);
                if *previous != start_tex {
                    // The previous branch ends elsewhere than this one
                    // starts: a discontinuous jump.
                    *previous = format!("{previous}|{start_tex}");
                }
            }
        }
        positions.push(bs.distance[branch.end_index]);
        labels.push(latexify(end));
    }

    TickSet::new(positions, labels)
}

fn add_projected_trace(
    figure: &mut Figure,
    label: &str,
    dos: &crate::electronic_structure::Dos,
    energies: &[f64],
    color: Color,
    note_extent: &mut impl FnMut(&[f64], &[f64]),
) {
    for spin in Spin::BOTH {
        let Some(dens) = dos.density(spin) else {
            continue;
        };
        let x: Vec<f64> = dens.iter().map(|d| spin.sign() * d).collect();
        note_extent(&x, energies);
        let mut line = LineSeries::new(x, energies.to_vec())
            .with_color(color)
            .with_width(BAND_LINEWIDTH);
        if spin == Spin::Up {
            line = line.with_label(label);
        }
        figure.add_line(line);
    }
}
