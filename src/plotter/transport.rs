use crate::config::{FERMI_LINEWIDTH, TRANSPORT_LINEWIDTH};
use crate::electronic_structure::{DopingSide, TransportData};
use crate::figure::{
    palette_color, AxisScale, Color, Figure, LineSeries, LineStyle, TextAnnotation,
};
use crate::plotter::dos::DosPlotter;
use crate::Result;

/// Builds thermoelectric transport figures against the chemical potential.
///
/// Every curve gets band-gap boundary lines at zero and at the gap energy,
/// plus dashed verticals marking the doping-level chemical potentials.
#[derive(Debug, Clone)]
pub struct TransportPlotter<'a> {
    data: &'a TransportData,
}

impl<'a> TransportPlotter<'a> {
    pub fn new(data: &'a TransportData) -> Self {
        Self { data }
    }

    /// Seebeck coefficient eigenvalues vs chemical potential.
    pub fn plot_seebeck_mu(&self, temp: u32) -> Result<Figure> {
        let triples = self.data.seebeck_at(temp)?;
        let figure = self.eigenvalue_plot(
            triples,
            "S",
            "Seebeck coefficient (uV/K)",
            AxisScale::Linear,
            temp,
        );
        Ok(figure)
    }

    /// Conductivity eigenvalues vs chemical potential, log y-axis.
    pub fn plot_conductivity_mu(&self, temp: u32, relaxation_time: f64) -> Result<Figure> {
        let triples = self.data.conductivity_at(temp, relaxation_time)?;
        let figure = self.eigenvalue_plot(
            &triples,
            "sigma",
            "Conductivity (1/(Ohm m))",
            AxisScale::Log,
            temp,
        );
        Ok(figure)
    }

    /// Power factor eigenvalues vs chemical potential, log y-axis.
    pub fn plot_power_factor_mu(&self, temp: u32, relaxation_time: f64) -> Result<Figure> {
        let triples = self.data.power_factor_at(temp, relaxation_time)?;
        let figure = self.eigenvalue_plot(
            &triples,
            "PF",
            "Power factor (uW/(m K^2))",
            AxisScale::Log,
            temp,
        );
        Ok(figure)
    }

    /// Figure of merit eigenvalues vs chemical potential.
    pub fn plot_zt_mu(&self, temp: u32) -> Result<Figure> {
        let triples = self.data.zt_at(temp)?;
        let figure = self.eigenvalue_plot(triples, "ZT", "ZT", AxisScale::Linear, temp);
        Ok(figure)
    }

    /// Carrier concentration vs chemical potential, log y-axis.
    pub fn plot_carriers(&self, temp: u32) -> Result<Figure> {
        let carriers = self.data.carrier_concentration_at(temp)?;
        Ok(self.scalar_plot(&carriers, "Carrier concentration (cm^-3)", temp))
    }

    /// Hall carrier concentration vs chemical potential, log y-axis.
    pub fn plot_hall_carriers(&self, temp: u32) -> Result<Figure> {
        let carriers = self.data.hall_carrier_concentration_at(temp)?;
        Ok(self.scalar_plot(&carriers, "Hall carrier concentration (cm^-3)", temp))
    }

    /// The reference DOS, smeared for presentation.
    pub fn plot_dos(&self, sigma: Option<f64>) -> Figure {
        let mut plotter = DosPlotter::new(false, false, sigma.or(Some(0.05)));
        plotter.add_dos("total", &self.data.dos);
        plotter.get_plot(None, None)
    }

    // ======================== COMMON PIECES ========================

    fn eigenvalue_plot(
        &self,
        triples: &[[f64; 3]],
        symbol: &str,
        y_label: &str,
        y_scale: AxisScale,
        temp: u32,
    ) -> Figure {
        let mut figure = Figure::new()
            .with_labels("E - E_F (eV)", y_label)
            .with_title(format!("{temp} K"))
            .with_y_scale(y_scale);

        for component in 0..3 {
            let y: Vec<f64> = triples.iter().map(|t| t[component]).collect();
            figure.add_line(
                LineSeries::new(self.data.mu_steps.clone(), y)
                    .with_color(palette_color(component))
                    .with_width(TRANSPORT_LINEWIDTH)
                    .with_label(format!("{symbol}_{}", component + 1)),
            );
        }

        self.finish(&mut figure, temp);
        figure
    }

    fn scalar_plot(&self, values: &[f64], y_label: &str, temp: u32) -> Figure {
        let mut figure = Figure::new()
            .with_labels("E - E_F (eV)", y_label)
            .with_title(format!("{temp} K"))
            .with_y_scale(AxisScale::Log);

        figure.add_line(
            LineSeries::new(self.data.mu_steps.clone(), values.to_vec())
                .with_color(palette_color(0))
                .with_width(TRANSPORT_LINEWIDTH),
        );

        self.finish(&mut figure, temp);
        figure
    }

    /// x-limits, gap boundary lines, and doping annotations shared by all
    /// transport curves.
    fn finish(&self, figure: &mut Figure, temp: u32) {
        figure.x_limits = Some((-0.5, self.data.gap + 0.5));
        self.add_gap_lines(figure);
        self.add_doping_annotations(figure, temp);
    }

    /// Band-gap boundary guide lines at zero and at the gap energy.
    fn add_gap_lines(&self, figure: &mut Figure) {
        figure.add_vline(0.0, Color::BLACK, FERMI_LINEWIDTH, LineStyle::Dotted);
        figure.add_vline(self.data.gap, Color::BLACK, FERMI_LINEWIDTH, LineStyle::Dotted);
    }

    /// Dashed verticals at the outermost doping chemical potentials per
    /// side, annotated with the decade of the doping level.
    fn add_doping_annotations(&self, figure: &mut Figure, temp: u32) {
        if !self.data.has_doping() {
            return;
        }
        let text_y = annotation_height(figure);

        for side in [DopingSide::N, DopingSide::P] {
            let (Some(levels), Some(mus)) = (
                self.data.doping.get(&side),
                self.data.mu_doping_at(side, temp),
            ) else {
                continue;
            };
            // Only the first and last doping level of each side are marked
            let mut picks = Vec::new();
            if !levels.is_empty() && !mus.is_empty() {
                picks.push(0);
            }
            if levels.len() > 1 && mus.len() > 1 {
                picks.push(levels.len().min(mus.len()) - 1);
            }
            for i in picks {
                let (level, mu) = (levels[i], mus[i]);
                figure.add_vline(mu, Color::BLACK, TRANSPORT_LINEWIDTH, LineStyle::Dashed);
                figure.add_text(TextAnnotation {
                    x: mu + 0.01,
                    y: text_y,
                    text: format!("{}=10^{:.1}", side.as_str(), level.abs().log10()),
                    color: Color::BLACK,
                    size: 10.0,
                });
            }
        }
    }
}

/// A y-position near the top of the drawn data, usable on log axes too.
fn annotation_height(figure: &Figure) -> f64 {
    match figure.resolved_y_limits() {
        Some((y_min, y_max)) => match figure.y_scale {
            AxisScale::Log if y_min > 0.0 && y_max > 0.0 => {
                (y_min.ln() + 0.9 * (y_max.ln() - y_min.ln())).exp()
            }
            _ => y_min + 0.9 * (y_max - y_min),
        },
        None => 0.0,
    }
}
