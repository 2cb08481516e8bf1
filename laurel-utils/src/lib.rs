/// Shared confirmation prompt helpers.
pub mod confirmation;
/// Generic embed builders shared across commands.
pub mod embed;
/// Shared formatting helpers (progress lines, display names).
pub mod formatting;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Shared pagination helper utilities.
pub mod pagination;
/// Trigger-word matching for XP events.
pub mod triggers;
