//! Loading game tuning from TOML.
//!
//! Every field is optional; anything left out keeps the built-in value from
//! `Rules::defaults_for`. Example:
//!
//! ```toml
//! data_dir = "/var/lib/bytewise"
//! color_tolerance = 0.08
//!
//! [variants.color_coding]
//! duration_secs = 45
//!
//! [variants.binary_basics]
//! time_bonus = { kind = "half_remaining", cap = 12 }
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::VariantKind;
use crate::error::Result;
use crate::scoring::{Rules, TimeBonus};
use crate::variants::DEFAULT_COLOR_TOLERANCE;

pub const CONFIG_PATH_ENV: &str = "BYTEWISE_CONFIG_PATH";
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
  #[serde(default)] pub data_dir: Option<PathBuf>,
  #[serde(default)] pub color_tolerance: Option<f64>,
  #[serde(default)] pub variants: VariantOverrides,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct VariantOverrides {
  #[serde(default)] pub binary_basics: Option<RulesOverride>,
  #[serde(default)] pub hexadecimal: Option<RulesOverride>,
  #[serde(default)] pub bitwise_ops: Option<RulesOverride>,
  #[serde(default)] pub ascii_text: Option<RulesOverride>,
  #[serde(default)] pub color_coding: Option<RulesOverride>,
  #[serde(default)] pub file_permissions: Option<RulesOverride>,
}

/// Partial `Rules`; set fields replace the defaults.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct RulesOverride {
  #[serde(default)] pub duration_secs: Option<u32>,
  #[serde(default)] pub base_points: Option<u32>,
  #[serde(default)] pub time_bonus: Option<TimeBonus>,
  #[serde(default)] pub streak_bonus: Option<u32>,
  #[serde(default)] pub history_cap: Option<usize>,
  #[serde(default)] pub completion_score: Option<u32>,
  #[serde(default)] pub completion_matches: Option<usize>,
  #[serde(default)] pub end_on_completion: Option<bool>,
  #[serde(default)] pub refill_secs: Option<u32>,
}

impl RulesOverride {
  fn apply(&self, mut rules: Rules) -> Rules {
    if let Some(v) = self.duration_secs { rules.duration_secs = v.max(1); }
    if let Some(v) = self.base_points { rules.base_points = v; }
    if let Some(v) = self.time_bonus { rules.time_bonus = v; }
    if let Some(v) = self.streak_bonus { rules.streak_bonus = v; }
    if let Some(v) = self.history_cap { rules.history_cap = v.max(1); }
    if let Some(v) = self.completion_score { rules.completion_score = Some(v); }
    if let Some(v) = self.completion_matches { rules.completion_matches = Some(v); }
    if let Some(v) = self.end_on_completion { rules.end_on_completion = v; }
    if let Some(v) = self.refill_secs { rules.refill_secs = v; }
    rules
  }
}

impl GameConfig {
  pub fn from_toml_str(s: &str) -> Result<Self> {
    Ok(toml::from_str(s)?)
  }

  pub fn rules_for(&self, kind: VariantKind) -> Rules {
    let defaults = Rules::defaults_for(kind);
    let o = &self.variants;
    let over = match kind {
      VariantKind::BinaryBasics => &o.binary_basics,
      VariantKind::Hexadecimal => &o.hexadecimal,
      VariantKind::BitwiseOps => &o.bitwise_ops,
      VariantKind::AsciiText => &o.ascii_text,
      VariantKind::ColorCoding => &o.color_coding,
      VariantKind::FilePermissions => &o.file_permissions,
    };
    match over {
      Some(over) => over.apply(defaults),
      None => defaults,
    }
  }

  pub fn color_tolerance(&self) -> f64 {
    self.color_tolerance.unwrap_or(DEFAULT_COLOR_TOLERANCE)
  }

  pub fn data_dir(&self) -> PathBuf {
    self.data_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
  }
}

/// Attempt to load `GameConfig` from BYTEWISE_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_game_config_from_env() -> Option<GameConfig> {
  let path = std::env::var(CONFIG_PATH_ENV).ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match GameConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "bytewise", %path, "Loaded game config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "bytewise", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "bytewise", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_config_keeps_defaults() {
    let cfg = GameConfig::from_toml_str("").unwrap();
    for kind in VariantKind::ALL {
      assert_eq!(cfg.rules_for(kind), Rules::defaults_for(kind));
    }
    assert_eq!(cfg.data_dir(), PathBuf::from(DEFAULT_DATA_DIR));
    assert_eq!(cfg.color_tolerance(), DEFAULT_COLOR_TOLERANCE);
  }

  #[test]
  fn test_partial_override() {
    let cfg = GameConfig::from_toml_str(
      r#"
      data_dir = "/tmp/bw"
      color_tolerance = 0.1

      [variants.color_coding]
      duration_secs = 45

      [variants.binary_basics]
      time_bonus = { kind = "half_remaining", cap = 12 }
      streak_bonus = 3
      "#,
    )
    .unwrap();

    let color = cfg.rules_for(VariantKind::ColorCoding);
    assert_eq!(color.duration_secs, 45);
    assert_eq!(color.base_points, 100);
    assert_eq!(color.completion_score, Some(500));

    let basics = cfg.rules_for(VariantKind::BinaryBasics);
    assert_eq!(basics.time_bonus, TimeBonus::HalfRemaining { cap: 12 });
    assert_eq!(basics.streak_bonus, 3);
    assert_eq!(basics.duration_secs, 20);

    assert_eq!(cfg.data_dir(), PathBuf::from("/tmp/bw"));
    assert_eq!(cfg.color_tolerance(), 0.1);
  }

  #[test]
  fn test_extreme_values_saturate() {
    let cfg = GameConfig::from_toml_str(
      r#"
      [variants.ascii_text]
      base_points = 4294967295
      streak_bonus = 4294967295
      refill_secs = 4294967295
      duration_secs = 4294967295
      "#,
    )
    .unwrap();
    let rules = cfg.rules_for(VariantKind::AsciiText);
    assert_eq!(rules.points(30, 0), u32::MAX);
    assert_eq!(rules.points(30, 7), u32::MAX);
    assert_eq!(rules.refilled(30), u32::MAX);
  }

  #[test]
  fn test_bad_toml_is_an_error() {
    assert!(GameConfig::from_toml_str("variants = 3").is_err());
  }
}
