use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use juliascope_core::{round_to_lattice, Complex, CoreError, LatticeKey};

use crate::cancel::SampleCancel;

/// The standard starting set for inverse iteration: `{1 + 0i}`.
///
/// Any repelling-orbit point works; 1 sits on or near the Julia set for a
/// wide range of `c` and its preimages converge onto the set quickly.
pub fn default_seed() -> Vec<Complex> {
    vec![Complex::ONE]
}

/// A point-set approximation of a Julia set.
///
/// `points` is deduplicated, in the order the rounds discovered them, so
/// repeated runs produce identical lists. The consumer
/// receives the resolution it was built at (`None` for the exact engine)
/// and re-rounds idempotently when rasterizing.
pub struct PointSetResult {
    pub points: Vec<Complex>,
    /// Lattice spacing used for deduplication, if any.
    pub resolution: Option<f64>,
    /// Rounds actually executed (may stop early on cancellation or an
    /// exhausted frontier).
    pub rounds_run: u32,
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// Exact-bits identity for deduplication without rounding.
///
/// `f64` is not `Hash`; the bit pattern is, and two finite values compare
/// equal iff their bits do (we never produce `-0.0`/`0.0` mixtures that
/// matter here, and NaN never enters a frontier).
#[inline]
fn bit_key(z: Complex) -> (u64, u64) {
    (z.re.to_bits(), z.im.to_bits())
}

/// Compute both preimage branches of every frontier point.
///
/// Pure per-point work, fanned out across the Rayon pool. The ordered
/// collect keeps downstream dedup deterministic.
fn branch_round(frontier: &[Complex], c: Complex) -> Vec<[Complex; 2]> {
    frontier
        .par_iter()
        .map(|&z| (z - c).sqrt_branches())
        .collect()
}

/// Grow a Julia-set approximation for `z ↦ z² + c` by inverse iteration.
///
/// Each round replaces the frontier with both square-root branches
/// `±√(z − c)` of every frontier point and folds them into the accumulated
/// set. The frontier doubles every round, reaching `2^depth` points after
/// `depth` rounds; this is the intended trade: deeper runs give denser
/// approximations, bounded by memory and time rather than the algorithm.
///
/// An empty seed degenerates to an empty result; it is not an error.
/// Cancellation is checked between rounds.
pub fn inverse_iteration(
    c: Complex,
    depth: u32,
    seed: &[Complex],
    cancel: &Arc<SampleCancel>,
) -> PointSetResult {
    let start = Instant::now();
    let gen = cancel.generation();
    cancel.reset_progress(depth as usize);
    debug!(%c, depth, seed_len = seed.len(), "starting inverse iteration");

    let mut frontier: Vec<Complex> = Vec::with_capacity(seed.len());
    let mut frontier_keys: HashSet<(u64, u64)> = HashSet::with_capacity(seed.len());
    for &z in seed {
        if frontier_keys.insert(bit_key(z)) {
            frontier.push(z);
        }
    }

    let mut points: Vec<Complex> = Vec::new();
    let mut seen: HashSet<(u64, u64)> = HashSet::new();
    let mut rounds_run = 0;
    let mut cancelled = false;

    for _ in 0..depth {
        if cancel.generation() != gen {
            cancelled = true;
            break;
        }

        let branches = branch_round(&frontier, c);

        // This round's preimage set, deduplicated under exact equality.
        let mut next = Vec::with_capacity(branches.len() * 2);
        let mut next_keys = HashSet::with_capacity(branches.len() * 2);
        for pair in branches {
            for p in pair {
                if next_keys.insert(bit_key(p)) {
                    next.push(p);
                }
            }
        }

        // Accumulate; the frontier keeps the full round regardless of
        // whether a point was produced in an earlier round.
        for &p in &next {
            if seen.insert(bit_key(p)) {
                points.push(p);
            }
        }
        frontier = next;
        rounds_run += 1;
        cancel.inc_progress();
    }

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        total_points = points.len(),
        rounds_run,
        cancelled,
        "inverse iteration complete"
    );

    PointSetResult {
        points,
        resolution: None,
        rounds_run,
        cancelled,
        elapsed,
    }
}

/// Inverse iteration with lattice-rounded deduplication.
///
/// Counteracts the `2^depth` blow-up: every raw preimage is snapped to the
/// `resolution` lattice, and only lattice cells never seen before stay in
/// the frontier for the next round. The accumulated set still receives the
/// full rounded preimage of every round, so it grows monotonically; total
/// work is bounded by the number of distinct cells the set touches rather
/// than by `2^depth`.
///
/// Once a round discovers no new cells the frontier empties and the
/// remaining rounds are skipped.
pub fn modified_inverse_iteration(
    c: Complex,
    depth: u32,
    resolution: f64,
    seed: &[Complex],
    cancel: &Arc<SampleCancel>,
) -> crate::Result<PointSetResult> {
    if resolution <= 0.0 || !resolution.is_finite() {
        return Err(CoreError::InvalidResolution(resolution).into());
    }

    let start = Instant::now();
    let gen = cancel.generation();
    cancel.reset_progress(depth as usize);
    debug!(%c, depth, resolution, seed_len = seed.len(), "starting modified inverse iteration");

    let mut frontier: Vec<Complex> = Vec::with_capacity(seed.len());
    let mut frontier_keys: HashSet<(u64, u64)> = HashSet::with_capacity(seed.len());
    for &z in seed {
        if frontier_keys.insert(bit_key(z)) {
            frontier.push(z);
        }
    }

    let mut points: Vec<Complex> = Vec::new();
    let mut seen: HashSet<LatticeKey> = HashSet::new();
    let mut rounds_run = 0;
    let mut cancelled = false;

    for round in 0..depth {
        if cancel.generation() != gen {
            cancelled = true;
            break;
        }
        if frontier.is_empty() {
            debug!(round, "frontier exhausted, skipping remaining rounds");
            break;
        }

        let branches = branch_round(&frontier, c);

        // Rounded preimages of this round, one entry per distinct cell.
        let mut round_cells: Vec<(LatticeKey, Complex)> =
            Vec::with_capacity(branches.len() * 2);
        let mut round_keys: HashSet<LatticeKey> = HashSet::with_capacity(branches.len() * 2);
        for pair in branches {
            for p in pair {
                let key = LatticeKey::of(p, resolution);
                if round_keys.insert(key) {
                    round_cells.push((key, round_to_lattice(p, resolution)));
                }
            }
        }

        // Only genuinely new cells drive the next round; the accumulated
        // set takes every newly seen cell (cells from earlier rounds are
        // already present, keeping growth monotonic).
        let mut next = Vec::new();
        for &(key, p) in &round_cells {
            if seen.insert(key) {
                points.push(p);
                next.push(p);
            }
        }
        frontier = next;
        rounds_run += 1;
        cancel.inc_progress();
    }

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        total_points = points.len(),
        rounds_run,
        cancelled,
        "modified inverse iteration complete"
    );

    Ok(PointSetResult {
        points,
        resolution: Some(resolution),
        rounds_run,
        cancelled,
        elapsed,
    })
}
