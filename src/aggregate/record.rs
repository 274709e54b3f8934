// src/aggregate/record.rs
use crate::classify::Label;
use crate::period::UNKNOWN_PERIOD;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Region used when a record carries none.
pub const UNKNOWN_REGION: &str = "Unknown";
/// Histogram bucket for missing / unparseable ratings.
pub const RATING_NA: &str = "NA";

/// One already-parsed review row, as handed over by the row source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub text: String,
    /// Raw rating as the source saw it; numbers and strings are both accepted.
    #[serde(default, deserialize_with = "rating_from_any")]
    pub rating: Option<String>,
    #[serde(default = "unknown_period")]
    pub year_month: String,
    #[serde(default, alias = "state")]
    pub region: Option<String>,
    /// Optional precomputed label ("positive" | "neutral" | "negative").
    #[serde(default)]
    pub label: Option<String>,
}

impl ReviewRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rating: None,
            year_month: unknown_period(),
            region: None,
            label: None,
        }
    }

    pub fn with_rating(mut self, rating: impl ToString) -> Self {
        self.rating = Some(rating.to_string());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_year_month(mut self, period: impl Into<String>) -> Self {
        self.year_month = period.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Integer view of the rating: truncated, unclamped, 0 when absent or unparseable.
    pub fn rating_value(&self) -> i32 {
        parse_rating(self.rating.as_deref())
            .map(|r| r.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .unwrap_or(0)
    }

    /// Trimmed region, `"Unknown"` when blank or absent.
    pub fn region_or_unknown(&self) -> &str {
        match self.region.as_deref().map(str::trim) {
            Some(r) if !r.is_empty() => r,
            _ => UNKNOWN_REGION,
        }
    }

    pub fn period(&self) -> &str {
        let p = self.year_month.trim();
        if p.is_empty() {
            UNKNOWN_PERIOD
        } else {
            p
        }
    }

    /// Parsed precomputed label; blank or unrecognized strings yield `None`.
    pub fn precomputed_label(&self) -> Option<Label> {
        let raw = self.label.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(l) => Some(l),
            Err(_) => {
                debug!(label = raw, "unrecognized precomputed label; analyzing text");
                None
            }
        }
    }
}

/// Map a raw rating to `"1"`..`"5"` (truncated, clamped) or `"NA"`.
pub fn bucket_rating(raw: Option<&str>) -> String {
    match parse_rating(raw) {
        Some(r) => r.clamp(1, 5).to_string(),
        None => RATING_NA.to_string(),
    }
}

fn parse_rating(raw: Option<&str>) -> Option<i64> {
    let v: f64 = raw?.trim().parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    // float -> int `as` saturates, which is what the clamp wants anyway
    Some(v.trunc() as i64)
}

fn unknown_period() -> String {
    UNKNOWN_PERIOD.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRating {
    Num(f64),
    Text(String),
}

fn rating_from_any<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawRating>::deserialize(d)?.map(|r| match r {
        RawRating::Num(n) => n.to_string(),
        RawRating::Text(s) => s,
    }))
}
