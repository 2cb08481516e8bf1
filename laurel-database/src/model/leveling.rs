use laurel_leveling::{LevelClamp, Progress};

/// Stored progress for a single user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserProgress {
    pub user_id: u64,
    pub name: String,
    pub progress: Progress,
}

/// Outcome of a persisted `setlevel`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoredOverride {
    pub progress: Progress,
    pub clamp: LevelClamp,
    pub inserted: bool,
}
