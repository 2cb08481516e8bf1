use poise::serenity_prelude as serenity;

use laurel_leveling::LevelClamp;
use laurel_utils::embed::error_embed;
use laurel_utils::formatting::neutralize_mentions;

/// Name shown in replies and stored alongside progress.
pub fn display_name(user: &serenity::User) -> String {
    user.global_name.clone().unwrap_or_else(|| user.name.clone())
}

pub fn reply_embed(embed: serenity::CreateEmbed) -> poise::CreateReply {
    poise::CreateReply::default().embed(embed)
}

pub fn usage_reply(usage: &str) -> poise::CreateReply {
    reply_embed(error_embed(format!("Usage: `{usage}`")))
}

pub fn permission_denied_message() -> &'static str {
    "⛔ You don't have enough permission for this command."
}

pub fn not_found_message() -> &'static str {
    "❗ User not found in database."
}

pub fn bot_target_message() -> &'static str {
    "❗ Bots can't earn XP."
}

pub fn level_set_headline(name: &str, level: i64) -> String {
    format!("✅ {}'s level has been set to {}.", neutralize_mentions(name), level)
}

/// Footer for `setlevel`: notes a newly created record and any clamping.
pub fn level_set_footer(name: &str, inserted: bool, clamp: LevelClamp, bound: i64) -> Option<String> {
    let mut lines = Vec::new();

    if inserted {
        lines.push(format!("{} has been added to the database.", neutralize_mentions(name)));
    }

    match clamp {
        LevelClamp::Unclamped => {}
        LevelClamp::ClampedToMax => lines.push(format!("Max level set to {}.", bound)),
        LevelClamp::ClampedToMin => lines.push(format!("Min level set to {}.", bound)),
    }

    if lines.is_empty() { None } else { Some(lines.join("\n")) }
}

pub fn xp_added_headline(name: &str, amount: u64) -> String {
    format!("✅ Added {} xp to {}.", amount, neutralize_mentions(name))
}
