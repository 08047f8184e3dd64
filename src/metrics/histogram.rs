use serde::Serialize;
use std::f64::consts::PI;

use crate::metrics::linspace;
use crate::process::pace::{column_to_minutes, PaceValue};
use crate::process::CleanTable;

pub const DEFAULT_BINS: usize = 20;
const CURVE_POINTS: usize = 100;

/// Maximum-likelihood normal fit (population standard deviation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalFit {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalFit {
    pub fn from_sample(xs: &[f64]) -> Option<Self> {
        if xs.is_empty() {
            return None;
        }
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std_dev: var.sqrt(),
        })
    }

    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        (-0.5 * z * z).exp() / (self.std_dev * (2.0 * PI).sqrt())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceHistogram {
    /// `bins + 1` edges in minutes.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub fit: NormalFit,
    /// Fitted density scaled to counts (`pdf * n * bin_width`), sampled over
    /// the observed range. Empty when every pace is identical.
    pub curve: Vec<(f64, f64)>,
    pub samples: usize,
}

pub fn pace_histogram(table: &CleanTable, bins: usize) -> Option<PaceHistogram> {
    let values: Vec<PaceValue> = table.iter().map(|r| PaceValue::from(r.pace)).collect();
    let minutes: Vec<f64> = column_to_minutes(&values)
        .into_iter()
        .filter(|m| !m.is_nan())
        .collect();
    if minutes.is_empty() || bins == 0 {
        return None;
    }

    let min = minutes.iter().copied().fold(f64::INFINITY, f64::min);
    let max = minutes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };

    let edges = linspace(lo, hi, bins + 1);
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &m in &minutes {
        counts[bin_index(m, lo, width, &edges)] += 1;
    }

    let fit = NormalFit::from_sample(&minutes)?;
    let curve = if fit.std_dev > 0.0 {
        let scale = minutes.len() as f64 * width;
        linspace(min, max, CURVE_POINTS)
            .into_iter()
            .map(|x| (x, fit.pdf(x) * scale))
            .collect()
    } else {
        Vec::new()
    };

    Some(PaceHistogram {
        edges,
        counts,
        fit,
        curve,
        samples: minutes.len(),
    })
}

/// Bin holding `m`: `edges[i] <= m < edges[i + 1]`, the last bin closed on
/// the right. The division only guesses; the edges decide.
fn bin_index(m: f64, lo: f64, width: f64, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    let mut idx = (((m - lo) / width) as usize).min(bins - 1);
    while idx > 0 && m < edges[idx] {
        idx -= 1;
    }
    while idx < bins - 1 && m >= edges[idx + 1] {
        idx += 1;
    }
    idx
}
