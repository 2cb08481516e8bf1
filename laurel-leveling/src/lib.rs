/// Level bounds and threshold configuration.
pub mod config;
/// XP grant and level override transitions.
pub mod progression;
/// Admin and super-admin privilege tiers.
pub mod privilege;
/// Leaderboard ordering and rank calculation.
pub mod ranking;

pub use config::LevelingConfig;
pub use privilege::{Privilege, SuperAdmins};
pub use progression::{BulkGrant, EventGrant, LevelClamp, LevelOverride, Progress, ProgressReport};
pub use ranking::{Leaderboard, RankedStanding, RequesterStanding, Standing};
