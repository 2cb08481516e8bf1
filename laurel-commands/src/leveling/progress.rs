use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::leveling::embeds::{display_name, not_found_message, reply_embed};
use laurel_core::{Context, Error};
use laurel_database::impls::progress::get_progress;
use laurel_utils::embed::{Tone, error_embed, status_embed};
use laurel_utils::formatting::{neutralize_mentions, progress_bar, progress_description};

pub const META: CommandMeta = CommandMeta {
    name: "progress",
    desc: "Show your own or another user's XP and level progress.",
    category: "leveling",
    usage: "!progress [user]",
};

#[poise::command(prefix_command, slash_command, category = "Leveling")]
pub async fn progress(
    ctx: Context<'_>,
    #[description = "The user to inspect (defaults to you)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());

    let Some(entry) = get_progress(&ctx.data().db, target.id.get()).await? else {
        ctx.send(reply_embed(error_embed(not_found_message()))).await?;
        return Ok(());
    };

    let report = ctx.data().leveling.report(entry.progress);
    let headline = if target.id == ctx.author().id {
        "📊 Your progress:".to_owned()
    } else {
        format!("📊 {}'s progress:", neutralize_mentions(&display_name(target)))
    };

    let embed = status_embed(Tone::Success, headline, None).description(format!(
        "{}\n{}",
        progress_description(
            report.level,
            report.xp,
            report.required_xp,
            report.percent,
            report.remaining_xp,
        ),
        progress_bar(report.percent)
    ));

    ctx.send(reply_embed(embed)).await?;
    Ok(())
}
