use std::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D lattice basis. Columns of `basis` are the primitive vectors.
///
/// Used for both direct and reciprocal space; Brillouin-zone plotting works
/// on the reciprocal lattice of the structure under study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    /// Basis vectors as matrix columns
    pub basis: Matrix3<f64>,
}

impl Lattice {
    pub fn new(basis: Matrix3<f64>) -> Self {
        Self { basis }
    }

    /// Simple cubic lattice with parameter `a`.
    pub fn cubic(a: f64) -> Self {
        Self {
            basis: Matrix3::from_diagonal(&Vector3::new(a, a, a)),
        }
    }

    /// Build from three primitive vectors.
    pub fn from_vectors(a1: Vector3<f64>, a2: Vector3<f64>, a3: Vector3<f64>) -> Self {
        Self {
            basis: Matrix3::from_columns(&[a1, a2, a3]),
        }
    }

    /// Primitive vectors as separate objects.
    pub fn primitive_vectors(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        (
            self.basis.column(0).into(),
            self.basis.column(1).into(),
            self.basis.column(2).into(),
        )
    }

    /// Convert fractional (u,v,w) coords → cartesian.
    pub fn frac_to_cart(&self, v_frac: Vector3<f64>) -> Vector3<f64> {
        self.basis * v_frac
    }

    /// Convert cartesian coords → fractional (u,v,w).
    pub fn cart_to_frac(&self, v_cart: Vector3<f64>) -> Vector3<f64> {
        self.basis
            .try_inverse()
            .expect("Lattice basis is singular")
            * v_cart
    }

    /// Unit cell volume.
    pub fn volume(&self) -> f64 {
        self.basis.determinant().abs()
    }

    /// Reciprocal lattice (2π convention).
    pub fn reciprocal(&self) -> Lattice {
        let inv = self
            .basis
            .try_inverse()
            .expect("Lattice basis must be invertible for a true 3D lattice");
        Lattice {
            basis: (2.0 * PI) * inv.transpose(),
        }
    }

    /// Fold a point into the first Brillouin zone of this lattice.
    ///
    /// Fractional coordinates are first wrapped into [-0.5, 0.5), then the
    /// nearest of the 27 surrounding lattice translations is subtracted so
    /// the result lands in the Wigner-Seitz cell around the origin.
    pub fn fold_point(&self, p: Vector3<f64>, coords_are_cartesian: bool) -> Vector3<f64> {
        let frac = if coords_are_cartesian {
            self.cart_to_frac(p)
        } else {
            p
        };

        let wrapped = frac.map(|x| (x + 0.5 - 1e-10).rem_euclid(1.0) - 0.5 + 1e-10);
        let mut cart = self.frac_to_cart(wrapped);

        let mut closest = Vector3::zeros();
        let mut smallest_distance = f64::INFINITY;
        for i in -1..=1 {
            for j in -1..=1 {
                for k in -1..=1 {
                    let lattice_point =
                        self.frac_to_cart(Vector3::new(i as f64, j as f64, k as f64));
                    let dist = (cart - lattice_point).norm();
                    if dist < smallest_distance {
                        closest = lattice_point;
                        smallest_distance = dist;
                    }
                }
            }
        }

        if closest.norm() > 0.0 {
            cart -= closest;
        }
        cart
    }
}
