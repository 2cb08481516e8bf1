use poise::serenity_prelude as serenity;
use tracing::info;

use crate::CommandMeta;
use crate::admin::access::require_privilege;
use crate::leveling::embeds::{display_name, reply_embed, usage_reply};
use laurel_core::{Context, Error};
use laurel_database::impls::admins::remove_admin;
use laurel_leveling::Privilege;
use laurel_utils::embed::{error_embed, success_embed};
use laurel_utils::formatting::neutralize_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "removeadmin",
    desc: "Revoke a user's admin rights.",
    category: "admin",
    usage: "!removeadmin <user>",
};

#[poise::command(prefix_command, slash_command, category = "Admin")]
pub async fn removeadmin(
    ctx: Context<'_>,
    #[description = "The admin to demote"] user: Option<serenity::User>,
) -> Result<(), Error> {
    if !require_privilege(ctx, Privilege::SuperAdmin).await? {
        return Ok(());
    }

    let Some(user) = user else {
        ctx.send(usage_reply(META.usage)).await?;
        return Ok(());
    };

    let name = neutralize_mentions(&display_name(&user));
    let removed = remove_admin(&ctx.data().db, user.id.get()).await?;

    let embed = if removed {
        info!(
            super_admin_id = ctx.author().id.get(),
            user_id = user.id.get(),
            "admin removed"
        );
        success_embed(format!("✅ {} is no longer an admin.", name))
    } else {
        error_embed(format!("⛔ {} is not an admin.", name))
    };

    ctx.send(reply_embed(embed)).await?;
    Ok(())
}
