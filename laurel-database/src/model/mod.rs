pub mod admins;
pub mod leveling;
