use tracing::info;

use laurel_core::{Context, Data, Error};
use laurel_database::impls::admins::is_admin;
use laurel_leveling::Privilege;
use laurel_utils::embed::error_embed;

use crate::leveling::embeds::{permission_denied_message, reply_embed};

/// Resolve a user's tier. Super-admins skip the membership lookup.
pub async fn resolve_privilege(data: &Data, user_id: u64) -> anyhow::Result<Privilege> {
    if data.super_admins.contains(user_id) {
        return Ok(Privilege::SuperAdmin);
    }

    let is_admin = is_admin(&data.db, user_id).await?;
    Ok(Privilege::resolve(false, is_admin))
}

/// Check the invoking user against `required`, replying with a denial when it fails.
pub async fn require_privilege(ctx: Context<'_>, required: Privilege) -> Result<bool, Error> {
    let user_id = ctx.author().id.get();
    let privilege = resolve_privilege(ctx.data(), user_id).await?;

    if privilege.satisfies(required) {
        return Ok(true);
    }

    info!(
        user_id,
        ?privilege,
        ?required,
        command = %ctx.command().qualified_name,
        "permission denied"
    );
    ctx.send(reply_embed(error_embed(permission_denied_message())))
        .await?;

    Ok(false)
}
