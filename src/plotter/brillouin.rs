use std::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};

use crate::config::LATTICE_TOLERANCE;
use crate::figure::{Color, Scene3};
use crate::lattice::{compute_wigner_seitz_cell, Lattice};
use crate::plotter::bands::latexify;
use crate::symmetry::KPath;
use crate::EsPlotError;
use crate::Result;

const PATH_COLOR: Color = Color::RED;
const LATTICE_VECTOR_COLOR: Color = Color::GREEN;
const LABEL_COLOR: Color = Color::BLUE;
const LABEL_SIZE: f64 = 25.0;
/// Labels are nudged off their anchor so they do not sit on the geometry.
const LABEL_OFFSET: f64 = 0.01;

const ELLIPSOID_RESOLUTION: usize = 100;
const ELLIPSOID_STRIDE: usize = 4;

/// Append the Wigner-Seitz cell of `lattice` as a black wireframe.
pub fn plot_wigner_seitz(lattice: &Lattice, scene: &mut Scene3) {
    let cell = compute_wigner_seitz_cell(&lattice.basis, LATTICE_TOLERANCE);
    for (start, end) in cell.wireframe() {
        scene.add_polyline(vec![start, end], Color::BLACK, 1.0);
    }
}

/// Append the three primitive vectors as green segments from the origin.
pub fn plot_lattice_vectors(lattice: &Lattice, scene: &mut Scene3) {
    let (a1, a2, a3) = lattice.primitive_vectors();
    for v in [a1, a2, a3] {
        scene.add_polyline(vec![Vector3::zeros(), v], LATTICE_VECTOR_COLOR, 3.0);
    }
}

/// Append one leg of a k-path as a red polyline.
///
/// Fractional input requires a lattice for the conversion.
pub fn plot_path(
    line: &[Vector3<f64>],
    lattice: Option<&Lattice>,
    coords_are_cartesian: bool,
    scene: &mut Scene3,
) -> Result<()> {
    let points = to_cartesian(line, lattice, coords_are_cartesian)?;
    scene.add_polyline(points, PATH_COLOR, 3.0);
    Ok(())
}

/// Append text labels at the given coordinates, TeX-wrapped like axis
/// ticks and nudged by a small offset.
pub fn plot_labels(
    labels: &[(String, Vector3<f64>)],
    lattice: Option<&Lattice>,
    coords_are_cartesian: bool,
    scene: &mut Scene3,
) -> Result<()> {
    let offset = Vector3::new(LABEL_OFFSET, LABEL_OFFSET, LABEL_OFFSET);
    for (label, coords) in labels {
        let cart = to_cartesian(std::slice::from_ref(coords), lattice, coords_are_cartesian)?;
        scene.add_label(cart[0] + offset, latexify(label), LABEL_COLOR, LABEL_SIZE);
    }
    Ok(())
}

/// Append point markers, optionally folded into the first Brillouin zone.
pub fn plot_points(
    points: &[Vector3<f64>],
    lattice: Option<&Lattice>,
    coords_are_cartesian: bool,
    fold: bool,
    scene: &mut Scene3,
) -> Result<()> {
    for &p in points {
        let cart = if fold {
            let lattice = lattice.ok_or(EsPlotError::MissingLattice)?;
            lattice.fold_point(p, coords_are_cartesian)
        } else {
            to_cartesian(std::slice::from_ref(&p), lattice, coords_are_cartesian)?[0]
        };
        scene.add_point(cart, Color::BLACK, 3.0);
    }
    Ok(())
}

/// The first Brillouin zone with an optional k-path overlay: Wigner-Seitz
/// wireframe, red path lines, blue labels, point markers. Axes are hidden,
/// the aspect is equal, and the view limits are fixed at ±1.
pub fn plot_brillouin_zone(
    lattice_rec: &Lattice,
    lines: &[[Vector3<f64>; 2]],
    labels: &[(String, Vector3<f64>)],
    kpoints: &[Vector3<f64>],
    fold: bool,
) -> Result<Scene3> {
    let mut scene = Scene3::new()
        .with_axes_visible(false)
        .with_equal_aspect(true);

    plot_wigner_seitz(lattice_rec, &mut scene);
    for line in lines {
        plot_path(line, Some(lattice_rec), false, &mut scene)?;
    }
    plot_labels(labels, Some(lattice_rec), false, &mut scene)?;
    plot_points(kpoints, Some(lattice_rec), false, fold, &mut scene)?;

    scene.limits = Some((Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0)));
    Ok(scene)
}

/// The Brillouin zone of a lattice with a standard high-symmetry path.
pub fn plot_brillouin_zone_from_kpath(kpath: &KPath, lattice_rec: &Lattice) -> Result<Scene3> {
    let labels: Vec<(String, Vector3<f64>)> = kpath
        .points
        .iter()
        .map(|(label, &coords)| (label.clone(), coords))
        .collect();

    let mut lines = Vec::new();
    for segment in &kpath.segments {
        for leg in segment.windows(2) {
            let start = kpath
                .point(&leg[0])
                .ok_or_else(|| EsPlotError::UnknownLabel(leg[0].clone()))?;
            let end = kpath
                .point(&leg[1])
                .ok_or_else(|| EsPlotError::UnknownLabel(leg[1].clone()))?;
            lines.push([start, end]);
        }
    }

    plot_brillouin_zone(lattice_rec, &lines, &labels, &[], false)
}

/// Append a wireframe ellipsoid for an effective-mass tensor.
///
/// The Hessian is decomposed by SVD; the ellipsoid radii are 1/√s scaled by
/// `rescale`, oriented by the rotation, centered at the (fractional) center.
pub fn plot_ellipsoid(
    hessian: &Matrix3<f64>,
    center: Vector3<f64>,
    lattice: Option<&Lattice>,
    rescale: f64,
    scene: &mut Scene3,
) -> Result<()> {
    let lattice = lattice.ok_or(EsPlotError::MissingLattice)?;
    let center_cart = lattice.frac_to_cart(center);

    let svd = hessian.svd(true, true);
    let rotation = svd.u.ok_or(EsPlotError::EmptyData("Hessian SVD"))?;
    let radii = svd.singular_values.map(|s| rescale / s.sqrt());

    let surface_point = |u: f64, v: f64| {
        let unit = Vector3::new(u.cos() * v.sin(), u.sin() * v.sin(), v.cos());
        rotation * unit.component_mul(&radii) + center_cart
    };

    let n = ELLIPSOID_RESOLUTION;
    let param = |i: usize, max: f64| i as f64 / (n - 1) as f64 * max;

    // Wireframe: constant-u and constant-v parameter lines every few steps
    for i in (0..n).step_by(ELLIPSOID_STRIDE) {
        let u = param(i, 2.0 * PI);
        let meridian: Vec<_> = (0..n).map(|j| surface_point(u, param(j, PI))).collect();
        scene.add_polyline(meridian, Color::new(0.2, 0.4, 0.8), 0.5);
    }
    for j in (0..n).step_by(ELLIPSOID_STRIDE) {
        let v = param(j, PI);
        let parallel: Vec<_> = (0..n).map(|i| surface_point(param(i, 2.0 * PI), v)).collect();
        scene.add_polyline(parallel, Color::new(0.2, 0.4, 0.8), 0.5);
    }
    Ok(())
}

fn to_cartesian(
    points: &[Vector3<f64>],
    lattice: Option<&Lattice>,
    coords_are_cartesian: bool,
) -> Result<Vec<Vector3<f64>>> {
    if coords_are_cartesian {
        return Ok(points.to_vec());
    }
    let lattice = lattice.ok_or(EsPlotError::MissingLattice)?;
    Ok(points.iter().map(|&p| lattice.frac_to_cart(p)).collect())
}
