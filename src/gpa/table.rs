use anyhow::{bail, Result};
use serde::Serialize;
use std::sync::LazyLock;

/// One band of the grading scale.
///
/// `min_marks` is an inclusive lower bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeThreshold {
    pub min_marks: i64,
    pub point: f64,
    pub letter: &'static str,
}

impl GradeThreshold {
    pub const fn new(min_marks: i64, point: f64, letter: &'static str) -> Self {
        Self {
            min_marks,
            point,
            letter,
        }
    }
}

const STANDARD_BANDS: [GradeThreshold; 7] = [
    GradeThreshold::new(90, 10.0, "S"),
    GradeThreshold::new(80, 9.0, "A"),
    GradeThreshold::new(70, 8.0, "B"),
    GradeThreshold::new(60, 7.0, "C"),
    GradeThreshold::new(50, 6.0, "D"),
    GradeThreshold::new(40, 5.0, "E"),
    GradeThreshold::new(0, 0.0, "F"),
];

static STANDARD: LazyLock<GradeTable> = LazyLock::new(|| GradeTable {
    bands: STANDARD_BANDS.to_vec(),
});

/// Ordered grading scale, highest threshold first.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeTable {
    bands: Vec<GradeThreshold>,
}

impl GradeTable {
    /// The fixed scale used for every calculation.
    pub fn standard() -> &'static GradeTable {
        &STANDARD
    }

    /// Build a table from bands in any order.
    ///
    /// Bands are sorted descending by `min_marks`. Fails on duplicate
    /// thresholds or when no band starts at 0.
    pub fn from_bands(mut bands: Vec<GradeThreshold>) -> Result<Self> {
        bands.sort_by(|a, b| b.min_marks.cmp(&a.min_marks));

        if bands.windows(2).any(|w| w[0].min_marks == w[1].min_marks) {
            bail!("Grade table has duplicate thresholds");
        }
        if !bands.iter().any(|b| b.min_marks == 0) {
            bail!("Grade table must contain a band starting at 0");
        }

        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[GradeThreshold] {
        &self.bands
    }

    /// Find the band for `marks`: the first, scanning from the top, whose
    /// threshold is at or below it. No clamping is applied, so 150 lands in
    /// the top band. Marks below every threshold fall into the lowest band.
    pub fn resolve(&self, marks: i64) -> &GradeThreshold {
        self.bands
            .iter()
            .find(|band| marks >= band.min_marks)
            .unwrap_or_else(|| self.lowest())
    }

    fn lowest(&self) -> &GradeThreshold {
        // Construction guarantees a 0 band, so the table is never empty
        &self.bands[self.bands.len() - 1]
    }
}
