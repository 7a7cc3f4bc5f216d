use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use juliascope_core::{ColorFn, CoreError, GridSpec, JuliaMap, ScalarField};

use crate::cancel::SampleCancel;

/// The result of sampling a colour function over a grid.
///
/// Carries the populated field together with the grid it was sampled on,
/// so the consumer has the four boundary coordinates it needs to place the
/// data on the complex plane. Row 0 of the field corresponds to `im_min`.
pub struct SampleResult {
    pub field: ScalarField,
    pub grid: GridSpec,
    pub elapsed: Duration,
    pub cancelled: bool,
    pub rows_sampled: usize,
}

/// Evaluate `color_fn` at the complex value of every grid cell.
///
/// Cells are independent, so rows are fanned out across the Rayon pool;
/// each worker fills a private row buffer and the rows are assembled into
/// the field after the join, keeping workers free of shared mutable state.
/// The result is identical to a sequential row-major traversal.
///
/// The escape bound is derived once from the map (via the colour function,
/// which knows which bound it iterates against) and passed to every cell.
///
/// The `cancel` handle can stop the run from another thread; cancellation
/// is checked between rows, and a cancelled run reports `cancelled = true`
/// with the unsampled rows left at zero.
pub fn sample_grid<C: ColorFn + Sync>(
    map: &JuliaMap,
    color_fn: &C,
    max_iterations: u32,
    grid: GridSpec,
    cancel: &Arc<SampleCancel>,
) -> crate::Result<SampleResult> {
    if max_iterations < 1 {
        return Err(CoreError::InvalidMaxIterations(max_iterations).into());
    }
    let bound = color_fn.bound(map)?;

    let start = Instant::now();
    let gen = cancel.generation();
    let width = grid.width();
    let height = grid.height();
    cancel.reset_progress(height as usize);
    debug!(width, height, bound, max_iterations, "starting grid sample");

    let rows: Vec<Option<Vec<f64>>> = (0..height)
        .into_par_iter()
        .map(|row| {
            if cancel.generation() != gen {
                return None;
            }
            let mut values = Vec::with_capacity(width as usize);
            for col in 0..width {
                let z0 = grid.cell_to_complex(row, col);
                values.push(color_fn.color(map, z0, max_iterations, bound));
            }
            cancel.inc_progress();
            Some(values)
        })
        .collect();

    let cancelled = cancel.generation() != gen;
    let mut field = ScalarField::new(width, height);
    let mut rows_sampled = 0;
    for (row, values) in rows.iter().enumerate() {
        if let Some(v) = values {
            field.fill_row(row as u32, v);
            rows_sampled += 1;
        }
    }

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        rows_sampled, cancelled, "grid sample complete"
    );

    Ok(SampleResult {
        field,
        grid,
        elapsed,
        cancelled,
        rows_sampled,
    })
}

/// Sample over the default region `[−bound, bound]²`.
///
/// The extent comes from the map's escape bound, which guarantees the
/// region contains the entire bounded set.
pub fn sample_default_region<C: ColorFn + Sync>(
    map: &JuliaMap,
    color_fn: &C,
    max_iterations: u32,
    resolution: f64,
    cancel: &Arc<SampleCancel>,
) -> crate::Result<SampleResult> {
    let grid = GridSpec::symmetric(map.escape_bound(), resolution)?;
    sample_grid(map, color_fn, max_iterations, grid, cancel)
}
