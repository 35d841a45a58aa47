use serde::{Deserialize, Serialize};

/// Spin channel of a collinear calculation.
///
/// The integer convention matches the usual sign trick used when plotting:
/// spin-down densities are drawn negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    /// Both channels in canonical plotting order (up first).
    pub const BOTH: [Spin; 2] = [Spin::Up, Spin::Down];

    /// Sign convention: +1 for up, -1 for down.
    pub fn sign(self) -> f64 {
        match self {
            Spin::Up => 1.0,
            Spin::Down => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Spin::Up => "up",
            Spin::Down => "down",
        }
    }
}

/// Orbital angular momentum character used for projected plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitalType {
    S,
    P,
    D,
    F,
}

impl OrbitalType {
    /// All orbital characters in increasing angular momentum order.
    pub const ALL: [OrbitalType; 4] = [
        OrbitalType::S,
        OrbitalType::P,
        OrbitalType::D,
        OrbitalType::F,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrbitalType::S => "s",
            OrbitalType::P => "p",
            OrbitalType::D => "d",
            OrbitalType::F => "f",
        }
    }
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for OrbitalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
