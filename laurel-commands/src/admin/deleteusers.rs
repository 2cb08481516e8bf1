use std::time::Duration;

use tracing::info;

use crate::CommandMeta;
use crate::admin::access::require_privilege;
use crate::leveling::embeds::reply_embed;
use laurel_core::{Context, Error};
use laurel_database::impls::progress::delete_all_progress;
use laurel_leveling::Privilege;
use laurel_utils::confirmation::{Confirmation, ConfirmationTexts, confirm_or_decline};
use laurel_utils::embed::{Tone, status_embed, success_embed};

pub const META: CommandMeta = CommandMeta {
    name: "deleteusers",
    desc: "Delete every user's XP and level.",
    category: "admin",
    usage: "!deleteusers",
};

const CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

#[poise::command(prefix_command, slash_command, category = "Admin")]
pub async fn deleteusers(ctx: Context<'_>) -> Result<(), Error> {
    if !require_privilege(ctx, Privilege::SuperAdmin).await? {
        return Ok(());
    }

    let prompt = status_embed(
        Tone::Error,
        "⚠️ Delete all users from the database?",
        Some("Every user's XP and level will be removed. This cannot be undone."),
    );
    let confirmation = confirm_or_decline(
        ctx,
        prompt,
        CONFIRM_TIMEOUT,
        ConfirmationTexts {
            confirmed: "Deleting all users...",
            declined: "Deletion cancelled.",
            timed_out: "Confirmation timed out; nothing was deleted.",
        },
    )
    .await?;

    if confirmation != Confirmation::Confirmed {
        return Ok(());
    }

    let deleted = delete_all_progress(&ctx.data().db).await?;
    info!(
        super_admin_id = ctx.author().id.get(),
        deleted, "all user progress deleted"
    );

    ctx.send(reply_embed(success_embed(format!(
        "✅ All users have been deleted from the database. ({} removed)",
        deleted
    ))))
    .await?;

    Ok(())
}
