use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::electronic_structure::dos::Dos;
use crate::error::EsPlotError;
use crate::Result;

/// Carrier type of a doping series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DopingSide {
    N,
    P,
}

impl DopingSide {
    pub fn as_str(self) -> &'static str {
        match self {
            DopingSide::N => "n",
            DopingSide::P => "p",
        }
    }
}

/// Results of an upstream Boltzmann transport calculation, as consumed by
/// the transport plotter.
///
/// Tensor quantities are stored as eigenvalue triples per chemical-potential
/// step. Conductivity-like quantities are per unit relaxation time; the
/// plotter scales them by the τ it is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportData {
    /// Band gap (eV)
    pub gap: f64,
    /// Chemical potential grid relative to the Fermi level (eV)
    pub mu_steps: Vec<f64>,
    /// Doping levels (cm⁻³) per carrier type
    pub doping: HashMap<DopingSide, Vec<f64>>,
    /// Chemical potentials of the doping levels, per carrier type and temperature (K)
    pub mu_doping: HashMap<DopingSide, HashMap<u32, Vec<f64>>>,
    /// Seebeck coefficient eigenvalues (µV/K) per temperature
    pub seebeck: HashMap<u32, Vec<[f64; 3]>>,
    /// Conductivity eigenvalues per unit relaxation time (1/(Ω·m·s))
    pub conductivity: HashMap<u32, Vec<[f64; 3]>>,
    /// Power factor eigenvalues per unit relaxation time (µW/(m·K²·s))
    pub power_factor: HashMap<u32, Vec<[f64; 3]>>,
    /// Dimensionless figure of merit eigenvalues (already includes τ)
    pub zt: HashMap<u32, Vec<[f64; 3]>>,
    /// Carrier concentration per unit cell, per temperature
    pub carrier_conc: HashMap<u32, Vec<f64>>,
    /// Hall carrier concentration (cm⁻³), per temperature
    pub hall_carrier_conc: HashMap<u32, Vec<f64>>,
    /// Unit cell volume (Å³), used to normalize carrier concentrations
    pub vol: f64,
    /// Reference DOS from the same calculation
    pub dos: Dos,
}

impl TransportData {
    fn lookup<'a, T>(map: &'a HashMap<u32, T>, temp: u32) -> Result<&'a T> {
        map.get(&temp).ok_or(EsPlotError::MissingTemperature(temp))
    }

    pub fn seebeck_at(&self, temp: u32) -> Result<&[[f64; 3]]> {
        Self::lookup(&self.seebeck, temp).map(Vec::as_slice)
    }

    /// Conductivity eigenvalues scaled by the relaxation time (1/(Ω·m)).
    pub fn conductivity_at(&self, temp: u32, relaxation_time: f64) -> Result<Vec<[f64; 3]>> {
        let per_tau = Self::lookup(&self.conductivity, temp)?;
        Ok(scale_triples(per_tau, relaxation_time))
    }

    /// Power factor eigenvalues scaled by the relaxation time (µW/(m·K²)).
    pub fn power_factor_at(&self, temp: u32, relaxation_time: f64) -> Result<Vec<[f64; 3]>> {
        let per_tau = Self::lookup(&self.power_factor, temp)?;
        Ok(scale_triples(per_tau, relaxation_time))
    }

    pub fn zt_at(&self, temp: u32) -> Result<&[[f64; 3]]> {
        Self::lookup(&self.zt, temp).map(Vec::as_slice)
    }

    /// |carriers| per cm³, normalized by the unit cell volume.
    pub fn carrier_concentration_at(&self, temp: u32) -> Result<Vec<f64>> {
        let per_cell = Self::lookup(&self.carrier_conc, temp)?;
        let cm3 = self.vol * 1e-24; // Å³ -> cm³
        Ok(per_cell.iter().map(|c| (c / cm3).abs()).collect())
    }

    pub fn hall_carrier_concentration_at(&self, temp: u32) -> Result<Vec<f64>> {
        let per_temp = Self::lookup(&self.hall_carrier_conc, temp)?;
        Ok(per_temp.iter().map(|c| c.abs()).collect())
    }

    /// Chemical potentials of the doping levels at one temperature.
    pub fn mu_doping_at(&self, side: DopingSide, temp: u32) -> Option<&[f64]> {
        self.mu_doping
            .get(&side)
            .and_then(|by_temp| by_temp.get(&temp))
            .map(Vec::as_slice)
    }

    pub fn has_doping(&self) -> bool {
        self.doping.values().any(|levels| !levels.is_empty())
    }
}

fn scale_triples(triples: &[[f64; 3]], factor: f64) -> Vec<[f64; 3]> {
    triples
        .iter()
        .map(|t| [t[0] * factor, t[1] * factor, t[2] * factor])
        .collect()
}
