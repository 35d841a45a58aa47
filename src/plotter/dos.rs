use std::collections::HashMap;

use serde_json::json;

use crate::config::{DOS_LINEWIDTH, FERMI_LINEWIDTH};
use crate::electronic_structure::{Dos, Spin};
use crate::figure::{palette_color, AreaSeries, Color, Figure, LineSeries, LineStyle};

/// One DOS as captured at add time: energies possibly shifted to E_F = 0,
/// densities possibly smeared.
#[derive(Debug, Clone)]
struct DosEntry {
    energies: Vec<f64>,
    densities: HashMap<Spin, Vec<f64>>,
    efermi: f64,
}

/// Builds DOS figures from one or more named densities of states.
///
/// Entries are drawn in reverse insertion order so the first-added DOS ends
/// up on top; colors cycle through the qualitative palette in draw order.
#[derive(Debug, Clone)]
pub struct DosPlotter {
    zero_at_efermi: bool,
    stack: bool,
    sigma: Option<f64>,
    doses: Vec<(String, DosEntry)>,
}

impl DosPlotter {
    /// Parameters:
    /// - `zero_at_efermi`: shift energies so the Fermi level sits at zero
    /// - `stack`: draw filled stacked areas instead of lines
    /// - `sigma`: Gaussian smearing width in eV, None for raw densities
    pub fn new(zero_at_efermi: bool, stack: bool, sigma: Option<f64>) -> Self {
        Self {
            zero_at_efermi,
            stack,
            sigma,
            doses: Vec::new(),
        }
    }

    /// Add a DOS under a label. Re-adding a label replaces the entry in
    /// place, keeping its position in the draw order.
    pub fn add_dos(&mut self, label: impl Into<String>, dos: &Dos) {
        let label = label.into();
        let energies = if self.zero_at_efermi {
            dos.energies.iter().map(|e| e - dos.efermi).collect()
        } else {
            dos.energies.clone()
        };
        let densities = match self.sigma {
            Some(sigma) => dos.smeared_densities(sigma),
            None => dos.densities.clone(),
        };
        let entry = DosEntry {
            energies,
            densities,
            efermi: dos.efermi,
        };

        if let Some(existing) = self.doses.iter_mut().find(|(l, _)| *l == label) {
            existing.1 = entry;
        } else {
            self.doses.push((label, entry));
        }
    }

    /// Bulk add in iteration order.
    pub fn add_dos_dict<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, Dos)>,
        S: Into<String>,
    {
        for (label, dos) in entries {
            self.add_dos(label, &dos);
        }
    }

    /// JSON view of the captured (shifted/smeared) data, keyed by label.
    pub fn dos_dict(&self) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        for (label, entry) in &self.doses {
            let densities: serde_json::Map<String, serde_json::Value> = entry
                .densities
                .iter()
                .map(|(spin, dens)| (spin.as_str().to_string(), json!(dens)))
                .collect();
            out.insert(
                label.clone(),
                json!({
                    "energies": entry.energies,
                    "densities": densities,
                    "efermi": entry.efermi,
                }),
            );
        }
        serde_json::Value::Object(out)
    }

    /// Build the DOS figure. `None` limits are derived from the data; the
    /// y-limits additionally restrict to points inside the x-window.
    pub fn get_plot(&self, xlim: Option<(f64, f64)>, ylim: Option<(f64, f64)>) -> Figure {
        let mut figure = Figure::new().with_labels("Energies (eV)", "Density of states");

        // Stacked mode accumulates each entry onto per-spin running sums,
        // in insertion order.
        let mut running: HashMap<Spin, Vec<f64>> = HashMap::new();
        let mut traces: Vec<(&str, Vec<f64>, Vec<f64>)> = Vec::new();
        for (label, entry) in &self.doses {
            let mut drawn: HashMap<Spin, Vec<f64>> = HashMap::new();
            for spin in Spin::BOTH {
                let Some(dens) = entry.densities.get(&spin) else {
                    continue;
                };
                if self.stack {
                    let sum = running
                        .entry(spin)
                        .or_insert_with(|| vec![0.0; dens.len()]);
                    for (acc, d) in sum.iter_mut().zip(dens) {
                        *acc += d;
                    }
                    drawn.insert(spin, sum.clone());
                } else {
                    drawn.insert(spin, dens.clone());
                }
            }

            // One trace per entry: spin-up forward, spin-down negated and
            // reversed so a stacked fill closes into a polygon.
            let mut x = Vec::new();
            let mut y = Vec::new();
            for spin in Spin::BOTH {
                let Some(dens) = drawn.get(&spin) else {
                    continue;
                };
                match spin {
                    Spin::Up => {
                        x.extend(entry.energies.iter().copied());
                        y.extend(dens.iter().copied());
                    }
                    Spin::Down => {
                        x.extend(entry.energies.iter().rev().copied());
                        y.extend(dens.iter().rev().map(|d| spin.sign() * d));
                    }
                }
            }
            traces.push((label.as_str(), x, y));
        }

        // Reverse draw order: the first-added entry paints last, on top.
        for (draw_idx, (label, x, y)) in traces.into_iter().rev().enumerate() {
            let color = palette_color(draw_idx);
            if self.stack {
                figure.add_area(AreaSeries::new(x, y, color).with_label(label));
            } else {
                figure.add_line(
                    LineSeries::new(x, y)
                        .with_color(color)
                        .with_width(DOS_LINEWIDTH)
                        .with_label(label),
                );
            }
        }

        if let Some(xlim) = xlim {
            figure.x_limits = Some(xlim);
        }
        match ylim {
            Some(ylim) => figure.y_limits = Some(ylim),
            None => {
                if let Some(window) = figure.resolved_x_limits() {
                    figure.y_limits = figure.y_range_within(window);
                }
            }
        }

        if self.zero_at_efermi {
            figure.add_vline(0.0, Color::BLACK, FERMI_LINEWIDTH, LineStyle::Dashed);
        } else {
            for (draw_idx, (_, entry)) in self.doses.iter().rev().enumerate() {
                figure.add_vline(
                    entry.efermi,
                    palette_color(draw_idx),
                    FERMI_LINEWIDTH,
                    LineStyle::Dashed,
                );
            }
        }

        figure
    }
}

impl Default for DosPlotter {
    fn default() -> Self {
        Self::new(true, false, None)
    }
}
