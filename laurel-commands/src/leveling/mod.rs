pub mod addxp;
pub(crate) mod embeds;
pub mod leaderboard;
pub mod progress;
pub mod setlevel;
