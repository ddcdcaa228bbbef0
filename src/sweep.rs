//! Grid sweep over laundry weights and dirt levels.
//!
//! Axis values are computed from an index (`min + i * step`) rather than by
//! repeated addition, so the last point never drifts past the bound.

use serde::Serialize;
use std::io::Write;

use crate::config::{OutputFormat, SweepSettings};
use crate::dosing::DosingEngine;
use crate::error::DoseError;

/// One evaluated grid point.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub laundry_weight_kg: f64,
    pub dirt_level: f64,
    /// Dose in grams, or the error message for cells outside the input domain
    #[serde(flatten)]
    pub outcome: SweepOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SweepOutcome {
    Dose { powder_amount_grams: f64 },
    Rejected { error: String },
}

/// Upper bound on the number of points along one sweep axis.
pub const MAX_AXIS_POINTS: usize = 1_000_000;

/// Upper bound on the number of rows one sweep produces.
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Number of points on the inclusive axis `min..=max`.
///
/// `axis` names the setting (`weight` or `dirt`) in error messages.
pub fn axis_len(axis: &str, min: f64, max: f64, step: f64) -> Result<usize, DoseError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(DoseError::Config(format!(
            "sweep.{}_min and sweep.{}_max must be finite, got {} and {}",
            axis, axis, min, max
        )));
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(DoseError::Config(format!(
            "sweep.{}_step must be positive, got {}",
            axis, step
        )));
    }
    if min > max {
        return Err(DoseError::Config(format!(
            "sweep.{}_min ({}) must not exceed sweep.{}_max ({})",
            axis, min, axis, max
        )));
    }

    // Tolerate float noise in (max - min) / step, e.g. 7.999999 steps.
    // An overflowing span yields inf and fails the bound below.
    let steps = ((max - min) / step + 1e-9).floor();
    if steps >= MAX_AXIS_POINTS as f64 {
        return Err(DoseError::Config(format!(
            "sweep.{} axis would have more than {} points",
            axis, MAX_AXIS_POINTS
        )));
    }
    Ok(steps as usize + 1)
}

/// Number of rows a sweep over `grid` produces.
pub fn grid_len(grid: &SweepSettings) -> Result<usize, DoseError> {
    let weights = axis_len("weight", grid.weight_min, grid.weight_max, grid.weight_step)?;
    let dirt_levels = axis_len("dirt", grid.dirt_min, grid.dirt_max, grid.dirt_step)?;
    match weights.checked_mul(dirt_levels) {
        Some(n) if n <= MAX_GRID_POINTS => Ok(n),
        _ => Err(DoseError::Config(format!(
            "sweep grid of {} x {} points exceeds {} rows",
            weights, dirt_levels, MAX_GRID_POINTS
        ))),
    }
}

/// Inclusive axis values from `min` to `max`.
pub fn axis_values(axis: &str, min: f64, max: f64, step: f64) -> Result<Vec<f64>, DoseError> {
    let len = axis_len(axis, min, max, step)?;
    Ok((0..len).map(|i| min + i as f64 * step).collect())
}

/// Evaluate every grid point, weights in the outer loop.
///
/// Out-of-domain cells become `SweepOutcome::Rejected`. A grid that cannot be
/// enumerated, or a logic error in the rule table, aborts the sweep.
pub fn run_sweep(engine: &DosingEngine, grid: &SweepSettings) -> Result<Vec<SweepRow>, DoseError> {
    let total = grid_len(grid)?;
    let weights = axis_values("weight", grid.weight_min, grid.weight_max, grid.weight_step)?;
    let dirt_levels = axis_values("dirt", grid.dirt_min, grid.dirt_max, grid.dirt_step)?;

    let mut rows = Vec::with_capacity(total);
    for &laundry_weight_kg in &weights {
        for &dirt_level in &dirt_levels {
            let outcome = match engine.compute(laundry_weight_kg, dirt_level) {
                Ok(params) => SweepOutcome::Dose {
                    powder_amount_grams: params.powder_amount_grams,
                },
                Err(e) if e.is_invalid_argument() => SweepOutcome::Rejected {
                    error: e.to_string(),
                },
                Err(e) => return Err(e),
            };
            rows.push(SweepRow {
                laundry_weight_kg,
                dirt_level,
                outcome,
            });
        }
    }

    tracing::debug!(
        rows = rows.len(),
        weights = weights.len(),
        dirt_levels = dirt_levels.len(),
        "Sweep complete"
    );
    Ok(rows)
}

impl SweepRow {
    /// Render as `weight dirt grams`, one decimal place by default.
    pub fn to_text(&self, precision: usize) -> String {
        match &self.outcome {
            SweepOutcome::Dose {
                powder_amount_grams,
            } => format!(
                "{:.p$} {:.p$} {:.p$}",
                self.laundry_weight_kg,
                self.dirt_level,
                powder_amount_grams,
                p = precision
            ),
            SweepOutcome::Rejected { error } => format!(
                "{:.p$} {:.p$} error: {}",
                self.laundry_weight_kg,
                self.dirt_level,
                error,
                p = precision
            ),
        }
    }
}

/// Write rows in the chosen format, one per line.
pub fn write_rows<W: Write>(
    out: &mut W,
    rows: &[SweepRow],
    format: OutputFormat,
    precision: usize,
) -> anyhow::Result<()> {
    for row in rows {
        match format {
            OutputFormat::Text => writeln!(out, "{}", row.to_text(precision))?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(row)?)?,
        }
    }
    out.flush()?;
    Ok(())
}
