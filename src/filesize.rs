//! File size converter: binary multiples (B, KiB, MiB, GiB, TiB).
//!
//! Not a timed game. Every successful conversion is worth a fixed number of
//! points, which accumulate in the progress store under `App_FILE SIZES`.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::achievements;
use crate::domain::FILE_SIZES_MODULE;
use crate::error::{Error, Result};
use crate::progress::ProgressStore;

pub const POINTS_PER_CONVERSION: u32 = 30;
pub const HISTORY_CAP: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileSizeUnit {
    #[serde(rename = "B")]
    Byte,
    #[serde(rename = "KiB")]
    Kibibyte,
    #[serde(rename = "MiB")]
    Mebibyte,
    #[serde(rename = "GiB")]
    Gibibyte,
    #[serde(rename = "TiB")]
    Tebibyte,
}

impl FileSizeUnit {
    pub const ALL: [FileSizeUnit; 5] = [
        FileSizeUnit::Byte,
        FileSizeUnit::Kibibyte,
        FileSizeUnit::Mebibyte,
        FileSizeUnit::Gibibyte,
        FileSizeUnit::Tebibyte,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            FileSizeUnit::Byte => "B",
            FileSizeUnit::Kibibyte => "KiB",
            FileSizeUnit::Mebibyte => "MiB",
            FileSizeUnit::Gibibyte => "GiB",
            FileSizeUnit::Tebibyte => "TiB",
        }
    }

    /// Bytes per unit: 1024 to the power of the unit's rank.
    pub fn multiplier(self) -> u64 {
        match self {
            FileSizeUnit::Byte => 1,
            FileSizeUnit::Kibibyte => 1 << 10,
            FileSizeUnit::Mebibyte => 1 << 20,
            FileSizeUnit::Gibibyte => 1 << 30,
            FileSizeUnit::Tebibyte => 1 << 40,
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            FileSizeUnit::Byte => "1 byte = 8 bits",
            FileSizeUnit::Kibibyte => "1 KiB = 1,024 bytes (2^10)",
            FileSizeUnit::Mebibyte => "1 MiB = 1,024 KiB (2^20)",
            FileSizeUnit::Gibibyte => "1 GiB = 1,024 MiB (2^30)",
            FileSizeUnit::Tebibyte => "1 TiB = 1,024 GiB (2^40)",
        }
    }
}

impl fmt::Display for FileSizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct FileSizeConversion {
    pub id: Uuid,
    pub source_value: f64,
    pub source_unit: FileSizeUnit,
    pub result: f64,
    pub target_unit: FileSizeUnit,
    pub steps: Vec<String>,
    pub points: u32,
    pub created_at: DateTime<Utc>,
}

impl FileSizeConversion {
    /// `"1.50 MiB = 1536.00 KiB"`
    pub fn formatted(&self) -> String {
        format!(
            "{:.2} {} = {:.2} {}",
            self.source_value, self.source_unit, self.result, self.target_unit
        )
    }
}

/// Parse a user-typed size. Only finite, non-negative numbers are accepted.
pub fn parse_size(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(Error::InvalidNumber(text.to_string())),
    }
}

/// Convert through bytes, returning the result and the explanation steps.
pub fn convert(value: f64, from: FileSizeUnit, to: FileSizeUnit) -> (f64, Vec<String>) {
    let bytes = value * from.multiplier() as f64;
    let result = bytes / to.multiplier() as f64;
    let steps = vec![
        format!("{} {} = {} bytes", value, from, bytes),
        format!("{} bytes / {} = {:.2} {}", bytes, to.multiplier(), result, to),
    ];
    (result, steps)
}

/// Scored converter bound to the progress store.
pub struct FileSizeConverter {
    progress: Arc<ProgressStore>,
    score: u32,
    history: VecDeque<FileSizeConversion>,
}

impl FileSizeConverter {
    pub fn new(progress: Arc<ProgressStore>) -> Self {
        Self {
            progress,
            score: 0,
            history: VecDeque::new(),
        }
    }

    /// Convert typed text; invalid numbers are reported and leave everything untouched.
    #[instrument(level = "info", skip(self))]
    pub fn convert(
        &mut self,
        text: &str,
        from: FileSizeUnit,
        to: FileSizeUnit,
    ) -> Result<&FileSizeConversion> {
        let value = parse_size(text)?;
        let (result, steps) = convert(value, from, to);

        self.score += POINTS_PER_CONVERSION;
        let previous = self.progress.module(FILE_SIZES_MODULE).map_or(0, |p| p.score);
        let module_score = previous.saturating_add(POINTS_PER_CONVERSION);
        self.progress.update(FILE_SIZES_MODULE, true, module_score);
        achievements::check_and_award(&self.progress, FILE_SIZES_MODULE, module_score);
        info!(target: "progress", %from, %to, result, module_score, "File size converted");

        self.history.push_front(FileSizeConversion {
            id: Uuid::new_v4(),
            source_value: value,
            source_unit: from,
            result,
            target_unit: to,
            steps,
            points: POINTS_PER_CONVERSION,
            created_at: Utc::now(),
        });
        self.history.truncate(HISTORY_CAP);
        Ok(&self.history[0])
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn history(&self) -> impl Iterator<Item = &FileSizeConversion> {
        self.history.iter()
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.history.clear();
    }
}
