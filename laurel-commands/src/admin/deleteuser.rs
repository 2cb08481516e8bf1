use poise::serenity_prelude as serenity;
use tracing::info;

use crate::CommandMeta;
use crate::admin::access::require_privilege;
use crate::leveling::embeds::{display_name, reply_embed, usage_reply};
use laurel_core::{Context, Error};
use laurel_database::impls::progress::delete_progress;
use laurel_leveling::Privilege;
use laurel_utils::embed::{error_embed, success_embed};
use laurel_utils::formatting::neutralize_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "deleteuser",
    desc: "Delete a user's XP and level.",
    category: "admin",
    usage: "!deleteuser <user>",
};

#[poise::command(prefix_command, slash_command, category = "Admin")]
pub async fn deleteuser(
    ctx: Context<'_>,
    #[description = "The user to wipe"] user: Option<serenity::User>,
) -> Result<(), Error> {
    if !require_privilege(ctx, Privilege::SuperAdmin).await? {
        return Ok(());
    }

    let Some(user) = user else {
        ctx.send(usage_reply(META.usage)).await?;
        return Ok(());
    };

    let name = neutralize_mentions(&display_name(&user));
    let deleted = delete_progress(&ctx.data().db, user.id.get()).await?;

    let embed = if deleted {
        info!(
            super_admin_id = ctx.author().id.get(),
            user_id = user.id.get(),
            "user progress deleted"
        );
        success_embed(format!("✅ {} has been deleted from the database.", name))
    } else {
        error_embed(format!("❗ {} is not in the database.", name))
    };

    ctx.send(reply_embed(embed)).await?;
    Ok(())
}
