use crate::config::LevelingConfig;

/// Level assigned when a trigger event first sees a user.
pub const EVENT_REGISTRATION_LEVEL: i64 = 0;
/// Level a bulk grant starts from for a user with no record.
pub const BULK_REGISTRATION_LEVEL: i64 = 1;

/// XP within the current level plus the level itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub xp: u64,
    pub level: i64,
}

impl Progress {
    pub const fn new(xp: u64, level: i64) -> Self {
        Self { xp, level }
    }
}

/// Result of a single trigger event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventGrant {
    /// First sighting of the user. Nothing was awarded.
    Registered(Progress),
    /// One XP was awarded; `level_up` carries the level after capping whenever a
    /// threshold was crossed, even if capping kept the level unchanged.
    Awarded {
        progress: Progress,
        level_up: Option<i64>,
    },
}

impl EventGrant {
    pub fn progress(&self) -> Progress {
        match self {
            Self::Registered(progress) => *progress,
            Self::Awarded { progress, .. } => *progress,
        }
    }

    pub fn level_up(&self) -> Option<i64> {
        match self {
            Self::Registered(_) => None,
            Self::Awarded { level_up, .. } => *level_up,
        }
    }
}

/// Result of an admin XP grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulkGrant {
    pub progress: Progress,
    pub levels_gained: u64,
    pub registered: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelClamp {
    Unclamped,
    ClampedToMax,
    ClampedToMin,
}

/// Result of an administrative `setlevel`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelOverride {
    pub progress: Progress,
    pub clamp: LevelClamp,
}

/// Derived view of a user's position inside their current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressReport {
    pub level: i64,
    pub xp: u64,
    pub required_xp: u64,
    pub percent: u64,
    pub remaining_xp: u64,
}

impl LevelingConfig {
    /// Apply one qualifying trigger event.
    ///
    /// An unseen user is only registered; at most one threshold is crossed
    /// per call since exactly one XP is added.
    pub fn grant_event_xp(&self, current: Option<Progress>) -> EventGrant {
        let Some(mut progress) = current else {
            let (level, _) = self.clamp_level(EVENT_REGISTRATION_LEVEL);
            return EventGrant::Registered(Progress::new(0, level));
        };

        progress.xp = progress.xp.saturating_add(1);

        let threshold = self.required_xp(progress.level);
        let crossed = progress.xp >= threshold;
        if crossed {
            progress.level = progress.level.saturating_add(1);
            progress.xp -= threshold;
        }

        self.cap_at_max_level(&mut progress);

        let level_up = crossed.then_some(progress.level);
        EventGrant::Awarded { progress, level_up }
    }

    /// Apply an arbitrary XP amount, crossing as many thresholds as it pays for.
    ///
    /// Ends in the same state as `amount` consecutive [`Self::grant_event_xp`]
    /// calls on an existing record. XP past `max_level` is discarded.
    pub fn grant_bulk_xp(&self, current: Option<Progress>, amount: u64) -> BulkGrant {
        let (mut progress, registered) = match current {
            Some(progress) => (
                Progress::new(progress.xp.saturating_add(amount), progress.level),
                false,
            ),
            None => {
                let (level, _) = self.clamp_level(BULK_REGISTRATION_LEVEL);
                (Progress::new(amount, level), true)
            }
        };

        let starting_level = progress.level;
        self.resolve_thresholds(&mut progress);
        self.cap_at_max_level(&mut progress);

        let levels_gained = u64::try_from(progress.level.saturating_sub(starting_level)).unwrap_or(0);

        BulkGrant {
            progress,
            levels_gained,
            registered,
        }
    }

    /// Set a level directly. XP is always reset.
    pub fn override_level(&self, requested: i64) -> LevelOverride {
        let (level, clamp) = self.clamp_level(requested);
        LevelOverride {
            progress: Progress::new(0, level),
            clamp,
        }
    }

    pub fn report(&self, progress: Progress) -> ProgressReport {
        let required_xp = self.required_xp(progress.level);
        let percent = u128::from(progress.xp) * 100 / u128::from(required_xp);

        ProgressReport {
            level: progress.level,
            xp: progress.xp,
            required_xp,
            percent: u64::try_from(percent).unwrap_or(u64::MAX),
            remaining_xp: required_xp.saturating_sub(progress.xp),
        }
    }

    fn resolve_thresholds(&self, progress: &mut Progress) {
        while progress.level < self.max_level() {
            let threshold = self.required_xp(progress.level);
            if progress.xp < threshold {
                return;
            }

            if self.is_saturated_at(progress.level) {
                // Every remaining level costs `threshold`, so settle them in one step.
                let affordable = progress.xp / threshold;
                let steps = affordable.min(progress.level.abs_diff(self.max_level()));
                progress.level = progress.level.saturating_add_unsigned(steps);
                progress.xp -= steps * threshold;
                return;
            }

            progress.xp -= threshold;
            progress.level += 1;
        }
    }

    fn cap_at_max_level(&self, progress: &mut Progress) {
        if progress.level >= self.max_level() {
            progress.level = self.max_level();
            progress.xp = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventGrant, LevelClamp, Progress};
    use crate::config::LevelingConfig;

    fn config() -> LevelingConfig {
        LevelingConfig::new(10.0, 5, 100, 0, 10).expect("valid config")
    }

    #[test]
    fn first_event_only_registers() {
        let grant = config().grant_event_xp(None);
        assert_eq!(grant, EventGrant::Registered(Progress::new(0, 0)));
        assert_eq!(grant.level_up(), None);
    }

    #[test]
    fn event_below_threshold_adds_one_xp() {
        let grant = config().grant_event_xp(Some(Progress::new(3, 2)));
        assert_eq!(grant.progress(), Progress::new(4, 2));
        assert_eq!(grant.level_up(), None);
    }

    #[test]
    fn event_crossing_threshold_levels_up_once() {
        let config = config();
        let threshold = config.required_xp(3);
        let grant = config.grant_event_xp(Some(Progress::new(threshold - 1, 3)));
        assert_eq!(grant.progress(), Progress::new(0, 4));
        assert_eq!(grant.level_up(), Some(4));
    }

    #[test]
    fn event_reaching_max_level_zeroes_xp() {
        let config = config();
        let threshold = config.required_xp(9);
        let grant = config.grant_event_xp(Some(Progress::new(threshold - 1, 9)));
        assert_eq!(grant.progress(), Progress::new(0, 10));
        assert_eq!(grant.level_up(), Some(10));
    }

    #[test]
    fn event_at_max_level_stays_capped() {
        let grant = config().grant_event_xp(Some(Progress::new(0, 10)));
        assert_eq!(grant.progress(), Progress::new(0, 10));
        assert_eq!(grant.level_up(), None);
    }

    #[test]
    fn event_crossing_at_max_level_announces_capped_level() {
        let config = LevelingConfig::new(0.0, 1, 1, 0, 3).expect("valid config");
        let grant = config.grant_event_xp(Some(Progress::new(0, 3)));
        assert_eq!(grant.progress(), Progress::new(0, 3));
        assert_eq!(grant.level_up(), Some(3));
    }

    #[test]
    fn bulk_for_unseen_user_starts_at_level_one() {
        let config = config();
        let grant = config.grant_bulk_xp(None, 25);
        assert!(grant.registered);
        // level 1 costs 20
        assert_eq!(grant.progress, Progress::new(5, 2));
        assert_eq!(grant.levels_gained, 1);
    }

    #[test]
    fn bulk_crosses_several_thresholds() {
        let config = config();
        // 20 (L1) + 40 (L2) + 60 (L3) = 120, 7 left over at level 4
        let grant = config.grant_bulk_xp(Some(Progress::new(0, 1)), 127);
        assert!(!grant.registered);
        assert_eq!(grant.progress, Progress::new(7, 4));
        assert_eq!(grant.levels_gained, 3);
    }

    #[test]
    fn bulk_discards_xp_past_max_level() {
        let grant = config().grant_bulk_xp(Some(Progress::new(0, 0)), 1_000_000);
        assert_eq!(grant.progress, Progress::new(0, 10));
        assert_eq!(grant.levels_gained, 10);
    }

    #[test]
    fn bulk_handles_huge_amounts_without_iterating_every_level() {
        let config = LevelingConfig::new(1.0, 1, 10, 0, i64::MAX).expect("valid config");
        let grant = config.grant_bulk_xp(Some(Progress::new(0, 0)), u64::MAX);
        assert!(grant.progress.level > 1_000_000);
        assert!(grant.progress.xp < 10);
    }

    #[test]
    fn bulk_with_zero_multiplier_uses_flat_threshold() {
        let config = LevelingConfig::new(0.0, 5, 100, 0, 1_000).expect("valid config");
        let grant = config.grant_bulk_xp(Some(Progress::new(2, 0)), 50);
        assert_eq!(grant.progress, Progress::new(2, 10));
    }

    #[test]
    fn override_resets_xp_and_reports_clamp() {
        let config = config();
        let within = config.override_level(4);
        assert_eq!(within.progress, Progress::new(0, 4));
        assert_eq!(within.clamp, LevelClamp::Unclamped);

        let high = config.override_level(99);
        assert_eq!(high.progress, Progress::new(0, 10));
        assert_eq!(high.clamp, LevelClamp::ClampedToMax);

        let low = config.override_level(-7);
        assert_eq!(low.progress, Progress::new(0, 0));
        assert_eq!(low.clamp, LevelClamp::ClampedToMin);
    }

    #[test]
    fn report_reflects_threshold() {
        let report = config().report(Progress::new(15, 3));
        assert_eq!(report.required_xp, 60);
        assert_eq!(report.percent, 25);
        assert_eq!(report.remaining_xp, 45);
    }
}
