use poise::serenity_prelude as serenity;
use tracing::info;

use crate::CommandMeta;
use crate::admin::access::require_privilege;
use crate::leveling::embeds::{
    bot_target_message, display_name, level_set_footer, level_set_headline, reply_embed,
    usage_reply,
};
use laurel_core::{Context, Error};
use laurel_database::impls::progress::override_level;
use laurel_leveling::{LevelClamp, Privilege};
use laurel_utils::embed::{Tone, error_embed, status_embed};

pub const META: CommandMeta = CommandMeta {
    name: "setlevel",
    desc: "Set a user's level directly and reset their XP.",
    category: "leveling",
    usage: "!setlevel <user> <level>",
};

#[poise::command(prefix_command, slash_command, category = "Leveling")]
pub async fn setlevel(
    ctx: Context<'_>,
    #[description = "The user to update"] user: Option<serenity::User>,
    #[description = "The level to set"] level: Option<i64>,
) -> Result<(), Error> {
    if !require_privilege(ctx, Privilege::Admin).await? {
        return Ok(());
    }

    let (Some(user), Some(level)) = (user, level) else {
        ctx.send(usage_reply(META.usage)).await?;
        return Ok(());
    };

    if user.bot {
        ctx.send(reply_embed(error_embed(bot_target_message()))).await?;
        return Ok(());
    }

    let config = ctx.data().leveling;
    let name = display_name(&user);
    let stored = override_level(&ctx.data().db, &config, user.id.get(), &name, level).await?;

    info!(
        moderator_id = ctx.author().id.get(),
        user_id = user.id.get(),
        requested_level = level,
        level = stored.progress.level,
        clamp = ?stored.clamp,
        "level overridden"
    );

    let bound = match stored.clamp {
        LevelClamp::ClampedToMin => config.min_level(),
        LevelClamp::Unclamped | LevelClamp::ClampedToMax => config.max_level(),
    };
    let footer = level_set_footer(&name, stored.inserted, stored.clamp, bound);

    ctx.send(reply_embed(status_embed(
        Tone::Success,
        level_set_headline(&name, stored.progress.level),
        footer.as_deref(),
    )))
    .await?;

    Ok(())
}
