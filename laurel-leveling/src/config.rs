use std::env;

use anyhow::{Context as _, bail};

use crate::progression::LevelClamp;

pub const DEFAULT_LEVEL_XP_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_MIN_LEVEL_EXPERIENCE: u64 = 5;
pub const DEFAULT_MAX_LEVEL_EXPERIENCE: u64 = 500;
pub const DEFAULT_MIN_LEVEL: i64 = 0;
pub const DEFAULT_MAX_LEVEL: i64 = 100;

/// Immutable leveling rules shared by every grant and override.
///
/// Construct through [`LevelingConfig::new`] so the bounds are validated once;
/// every transition afterwards relies on `min_level_experience >= 1` and on
/// both ranges being ordered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelingConfig {
    level_xp_multiplier: f64,
    min_level_experience: u64,
    max_level_experience: u64,
    min_level: i64,
    max_level: i64,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            level_xp_multiplier: DEFAULT_LEVEL_XP_MULTIPLIER,
            min_level_experience: DEFAULT_MIN_LEVEL_EXPERIENCE,
            max_level_experience: DEFAULT_MAX_LEVEL_EXPERIENCE,
            min_level: DEFAULT_MIN_LEVEL,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

impl LevelingConfig {
    pub fn new(
        level_xp_multiplier: f64,
        min_level_experience: u64,
        max_level_experience: u64,
        min_level: i64,
        max_level: i64,
    ) -> anyhow::Result<Self> {
        if !level_xp_multiplier.is_finite() || level_xp_multiplier < 0.0 {
            bail!("level_xp_multiplier must be a finite, non-negative number (got {level_xp_multiplier})");
        }
        if min_level_experience == 0 {
            bail!("min_level_experience must be at least 1");
        }
        if min_level_experience > max_level_experience {
            bail!(
                "min_level_experience ({min_level_experience}) exceeds max_level_experience ({max_level_experience})"
            );
        }
        if min_level > max_level {
            bail!("min_level ({min_level}) exceeds max_level ({max_level})");
        }

        Ok(Self {
            level_xp_multiplier,
            min_level_experience,
            max_level_experience,
            min_level,
            max_level,
        })
    }

    /// Read the leveling rules from `LEVEL_XP_MULTIPLIER`, `MIN_LEVEL_EXPERIENCE`,
    /// `MAX_LEVEL_EXPERIENCE`, `MIN_LEVEL` and `MAX_LEVEL`, falling back to the
    /// defaults for unset or empty variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(
            env_parse("LEVEL_XP_MULTIPLIER", DEFAULT_LEVEL_XP_MULTIPLIER)?,
            env_parse("MIN_LEVEL_EXPERIENCE", DEFAULT_MIN_LEVEL_EXPERIENCE)?,
            env_parse("MAX_LEVEL_EXPERIENCE", DEFAULT_MAX_LEVEL_EXPERIENCE)?,
            env_parse("MIN_LEVEL", DEFAULT_MIN_LEVEL)?,
            env_parse("MAX_LEVEL", DEFAULT_MAX_LEVEL)?,
        )
    }

    pub fn level_xp_multiplier(&self) -> f64 {
        self.level_xp_multiplier
    }

    pub fn min_level_experience(&self) -> u64 {
        self.min_level_experience
    }

    pub fn max_level_experience(&self) -> u64 {
        self.max_level_experience
    }

    pub fn min_level(&self) -> i64 {
        self.min_level
    }

    pub fn max_level(&self) -> i64 {
        self.max_level
    }

    /// XP needed to advance from `level` to the next one.
    ///
    /// Saturates at `max_level_experience`: once the scaled value reaches the
    /// cap, every higher level costs the same amount.
    pub fn required_xp(&self, level: i64) -> u64 {
        let scaled = (level as f64 * 2.0 * self.level_xp_multiplier).round_ties_even();

        if scaled >= self.max_level_experience as f64 {
            self.max_level_experience
        } else if scaled <= self.min_level_experience as f64 {
            self.min_level_experience
        } else {
            scaled as u64
        }
    }

    /// Restrict a level into `[min_level, max_level]`, reporting which bound applied.
    pub fn clamp_level(&self, level: i64) -> (i64, LevelClamp) {
        if level > self.max_level {
            (self.max_level, LevelClamp::ClampedToMax)
        } else if level < self.min_level {
            (self.min_level, LevelClamp::ClampedToMin)
        } else {
            (level, LevelClamp::Unclamped)
        }
    }

    /// True when the threshold no longer grows with the level.
    pub(crate) fn is_saturated_at(&self, level: i64) -> bool {
        self.level_xp_multiplier == 0.0
            || self.required_xp(level) == self.max_level_experience
    }
}

fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: `{}`", value.trim())),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::{LevelClamp, LevelingConfig};

    fn config() -> LevelingConfig {
        LevelingConfig::new(10.0, 5, 100, 0, 50).expect("valid config")
    }

    #[test]
    fn threshold_scales_with_level() {
        let config = config();
        assert_eq!(config.required_xp(1), 20);
        assert_eq!(config.required_xp(3), 60);
    }

    #[test]
    fn threshold_is_floored_at_min_experience() {
        let config = config();
        assert_eq!(config.required_xp(0), 5);
        assert_eq!(config.required_xp(-4), 5);
    }

    #[test]
    fn threshold_saturates_at_max_experience() {
        let config = config();
        assert_eq!(config.required_xp(5), 100);
        assert_eq!(config.required_xp(6), 100);
        assert_eq!(config.required_xp(i64::MAX), 100);
    }

    #[test]
    fn threshold_rounds_half_to_even() {
        let config = LevelingConfig::new(1.25, 1, 1_000, 0, 100).expect("valid config");
        // 1 * 2 * 1.25 = 2.5 -> 2, 3 * 2 * 1.25 = 7.5 -> 8
        assert_eq!(config.required_xp(1), 2);
        assert_eq!(config.required_xp(3), 8);
    }

    #[test]
    fn threshold_stays_within_bounds() {
        let config = LevelingConfig::new(3.7, 7, 250, -20, 200).expect("valid config");
        for level in -50..=300 {
            let required = config.required_xp(level);
            assert!((7..=250).contains(&required), "level {level} -> {required}");
        }
    }

    #[test]
    fn clamp_level_reports_bound() {
        let config = config();
        assert_eq!(config.clamp_level(10), (10, LevelClamp::Unclamped));
        assert_eq!(config.clamp_level(75), (50, LevelClamp::ClampedToMax));
        assert_eq!(config.clamp_level(-3), (0, LevelClamp::ClampedToMin));
    }

    #[test]
    fn rejects_invalid_bounds() {
        assert!(LevelingConfig::new(1.0, 0, 10, 0, 10).is_err());
        assert!(LevelingConfig::new(1.0, 20, 10, 0, 10).is_err());
        assert!(LevelingConfig::new(1.0, 1, 10, 11, 10).is_err());
        assert!(LevelingConfig::new(f64::NAN, 1, 10, 0, 10).is_err());
        assert!(LevelingConfig::new(-1.0, 1, 10, 0, 10).is_err());
    }

    #[test]
    fn default_rules_pass_validation() {
        let defaults = LevelingConfig::default();
        let validated = LevelingConfig::new(
            defaults.level_xp_multiplier(),
            defaults.min_level_experience(),
            defaults.max_level_experience(),
            defaults.min_level(),
            defaults.max_level(),
        )
        .expect("defaults are valid");
        assert_eq!(validated, defaults);
    }
}
