use tracing::debug;

use juliascope_core::{round_to_lattice, Complex, CoreError, GridSpec, ScalarField};

use crate::error::SamplerError;

/// Rasterize a point list into a scalar field by marking lattice cells.
///
/// Every point is snapped to the `resolution` lattice (idempotent when the
/// list was already produced at the same resolution), the grid bounds are
/// derived from the snapped extents, and each occupied cell is set to `1.0`
/// against a `0.0` background. Row 0 corresponds to the minimum imaginary
/// part, matching the forward sampler's orientation.
///
/// A point set whose extent collapses on an axis (a single point, or points
/// on one lattice line) still rasterizes: the degenerate axis gets a single
/// cell, with the grid's max nudged by half a cell to keep the region
/// non-empty.
///
/// An empty list has no extents to derive and is an error.
pub fn rasterize(points: &[Complex], resolution: f64) -> crate::Result<(ScalarField, GridSpec)> {
    if resolution <= 0.0 || !resolution.is_finite() {
        return Err(CoreError::InvalidResolution(resolution).into());
    }
    if points.is_empty() {
        return Err(SamplerError::EmptyPointSet);
    }

    let snapped: Vec<Complex> = points
        .iter()
        .map(|&z| round_to_lattice(z, resolution))
        .collect();

    let mut re_min = f64::INFINITY;
    let mut re_max = f64::NEG_INFINITY;
    let mut im_min = f64::INFINITY;
    let mut im_max = f64::NEG_INFINITY;
    for z in &snapped {
        re_min = re_min.min(z.re);
        re_max = re_max.max(z.re);
        im_min = im_min.min(z.im);
        im_max = im_max.max(z.im);
    }
    if re_max <= re_min {
        re_max = re_min + resolution / 2.0;
    }
    if im_max <= im_min {
        im_max = im_min + resolution / 2.0;
    }

    let grid = GridSpec::new(re_min, re_max, im_min, im_max, resolution)?;
    let mut field = ScalarField::new(grid.width(), grid.height());
    for z in &snapped {
        let col = ((z.re - re_min) / resolution).round() as u32;
        let row = ((z.im - im_min) / resolution).round() as u32;
        field.set(row, col, 1.0);
    }

    debug!(
        points = points.len(),
        width = field.width,
        height = field.height,
        "rasterized point set"
    );
    Ok((field, grid))
}
