use super::{lenient, lenient_number, percentage};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The four totals reported by coverage tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CoverageKind {
    Lines,
    Branches,
    Functions,
    Statements,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "RawCoverageMetric")]
pub struct CoverageMetric {
    pub total: u64,
    pub covered: u64,
    pub pct: f64,
}

#[derive(Deserialize)]
struct RawCoverageMetric {
    #[serde(default, deserialize_with = "lenient")]
    total: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    covered: Option<u64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pct: Option<f64>,
}

impl From<RawCoverageMetric> for CoverageMetric {
    fn from(raw: RawCoverageMetric) -> Self {
        let total = raw.total.unwrap_or(0);
        let covered = raw.covered.unwrap_or(0);
        Self {
            total,
            covered,
            pct: raw.pct.unwrap_or_else(|| percentage(covered, total)),
        }
    }
}

/// Whole-project coverage totals.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoverageOverall {
    #[serde(default, deserialize_with = "lenient")]
    pub lines: Option<CoverageMetric>,
    #[serde(default, deserialize_with = "lenient")]
    pub branches: Option<CoverageMetric>,
    #[serde(default, deserialize_with = "lenient")]
    pub functions: Option<CoverageMetric>,
    #[serde(default, deserialize_with = "lenient")]
    pub statements: Option<CoverageMetric>,
}

impl CoverageOverall {
    #[must_use]
    pub const fn get(&self, kind: CoverageKind) -> Option<&CoverageMetric> {
        match kind {
            CoverageKind::Lines => self.lines.as_ref(),
            CoverageKind::Branches => self.branches.as_ref(),
            CoverageKind::Functions => self.functions.as_ref(),
            CoverageKind::Statements => self.statements.as_ref(),
        }
    }

    #[must_use]
    pub fn pct(&self, kind: CoverageKind) -> Option<f64> {
        self.get(kind).map(|metric| metric.pct)
    }
}
