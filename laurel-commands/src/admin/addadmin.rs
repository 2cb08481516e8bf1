use poise::serenity_prelude as serenity;
use tracing::info;

use crate::CommandMeta;
use crate::admin::access::require_privilege;
use crate::leveling::embeds::{display_name, reply_embed, usage_reply};
use laurel_core::{Context, Error};
use laurel_database::impls::admins::add_admin;
use laurel_leveling::Privilege;
use laurel_utils::embed::{error_embed, success_embed};
use laurel_utils::formatting::neutralize_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "addadmin",
    desc: "Allow a user to manage XP and levels.",
    category: "admin",
    usage: "!addadmin <user>",
};

#[poise::command(prefix_command, slash_command, category = "Admin")]
pub async fn addadmin(
    ctx: Context<'_>,
    #[description = "The user to promote"] user: Option<serenity::User>,
) -> Result<(), Error> {
    if !require_privilege(ctx, Privilege::SuperAdmin).await? {
        return Ok(());
    }

    let Some(user) = user else {
        ctx.send(usage_reply(META.usage)).await?;
        return Ok(());
    };

    let name = display_name(&user);
    let added = add_admin(&ctx.data().db, user.id.get(), &name).await?;

    let embed = if added {
        info!(
            super_admin_id = ctx.author().id.get(),
            user_id = user.id.get(),
            "admin added"
        );
        success_embed(format!("✅ {} has been added as an admin.", neutralize_mentions(&name)))
    } else {
        error_embed(format!("❌ {} is already an admin.", neutralize_mentions(&name)))
    };

    ctx.send(reply_embed(embed)).await?;
    Ok(())
}
