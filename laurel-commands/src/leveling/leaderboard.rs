use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::leveling::embeds::{display_name, reply_embed};
use laurel_core::{Context, Error};
use laurel_database::impls::progress::list_standings;
use laurel_leveling::ranking::DEFAULT_LEADERBOARD_SIZE;
use laurel_leveling::{Leaderboard, RequesterStanding};
use laurel_utils::embed::{Tone, status_embed};
use laurel_utils::formatting::{neutralize_mentions, standing_value};

pub const META: CommandMeta = CommandMeta {
    name: "leaderboard",
    desc: "Show the top users by level and your own rank.",
    category: "leveling",
    usage: "!leaderboard",
};

#[poise::command(prefix_command, slash_command, category = "Leveling")]
pub async fn leaderboard(ctx: Context<'_>) -> Result<(), Error> {
    let standings = list_standings(&ctx.data().db).await?;
    let board = Leaderboard::build(standings, ctx.author().id.get(), DEFAULT_LEADERBOARD_SIZE);

    let embed = leaderboard_embed(&board, &display_name(ctx.author()));
    ctx.send(reply_embed(embed)).await?;
    Ok(())
}

fn leaderboard_embed(board: &Leaderboard, requester_name: &str) -> serenity::CreateEmbed {
    let description = if board.top.is_empty() {
        "Nobody has earned any XP yet.".to_owned()
    } else {
        format!("Top {} Users by Level", DEFAULT_LEADERBOARD_SIZE)
    };

    let mut embed = status_embed(Tone::Info, "Leaderboard", None).description(description);

    for entry in &board.top {
        let marker = if entry.is_requester { " (You)" } else { "" };
        embed = embed.field(
            format!(
                "{}. {}{}",
                entry.rank,
                neutralize_mentions(&entry.standing.name),
                marker
            ),
            standing_value(entry.standing.level, entry.standing.xp, None),
            false,
        );
    }

    match &board.requester {
        RequesterStanding::Listed => embed,
        RequesterStanding::Ranked { standing, rank } => embed.field(
            format!("{} (You)", neutralize_mentions(&standing.name)),
            standing_value(standing.level, standing.xp, Some(*rank)),
            false,
        ),
        RequesterStanding::Unranked => embed.field(
            format!("{} (You)", neutralize_mentions(requester_name)),
            "You don't have any XP and Level.",
            false,
        ),
    }
}
