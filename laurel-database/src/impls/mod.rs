pub mod admins;
pub mod progress;
