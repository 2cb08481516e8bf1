use poise::serenity_prelude as serenity;
use tracing::info;

use crate::CommandMeta;
use crate::admin::access::require_privilege;
use crate::leveling::embeds::{
    bot_target_message, display_name, reply_embed, usage_reply, xp_added_headline,
};
use laurel_core::{Context, Error};
use laurel_database::impls::progress::grant_xp;
use laurel_leveling::Privilege;
use laurel_utils::embed::{Tone, error_embed, status_embed};
use laurel_utils::formatting::neutralize_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "addxp",
    desc: "Grant XP to a user, levelling them up as needed.",
    category: "leveling",
    usage: "!addxp <user> <amount>",
};

#[poise::command(prefix_command, slash_command, category = "Leveling")]
pub async fn addxp(
    ctx: Context<'_>,
    #[description = "The user to reward"] user: Option<serenity::User>,
    #[description = "Amount of XP to add"] amount: Option<i64>,
) -> Result<(), Error> {
    if !require_privilege(ctx, Privilege::Admin).await? {
        return Ok(());
    }

    let (Some(user), Some(amount)) = (user, amount) else {
        ctx.send(usage_reply(META.usage)).await?;
        return Ok(());
    };

    let Some(amount) = u64::try_from(amount).ok().filter(|value| *value > 0) else {
        ctx.send(reply_embed(error_embed("❗ Amount must be a positive number.")))
            .await?;
        return Ok(());
    };

    if user.bot {
        ctx.send(reply_embed(error_embed(bot_target_message()))).await?;
        return Ok(());
    }

    let name = display_name(&user);
    let grant = grant_xp(
        &ctx.data().db,
        &ctx.data().leveling,
        user.id.get(),
        &name,
        amount,
    )
    .await?;

    info!(
        moderator_id = ctx.author().id.get(),
        user_id = user.id.get(),
        amount,
        level = grant.progress.level,
        levels_gained = grant.levels_gained,
        registered = grant.registered,
        "xp granted"
    );

    let mut footer = format!(
        "Now level {} with {} xp.",
        grant.progress.level, grant.progress.xp
    );
    if grant.registered {
        footer = format!(
            "{} has been added to the database.\n{}",
            neutralize_mentions(&name),
            footer
        );
    }

    ctx.send(reply_embed(status_embed(
        Tone::Success,
        xp_added_headline(&name, amount),
        Some(&footer),
    )))
    .await?;

    Ok(())
}
