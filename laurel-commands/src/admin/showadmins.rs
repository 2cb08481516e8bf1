use crate::CommandMeta;
use crate::admin::access::require_privilege;
use crate::leveling::embeds::reply_embed;
use laurel_core::{Context, Error};
use laurel_database::impls::admins::list_admins;
use laurel_database::model::admins::AdminRecord;
use laurel_leveling::Privilege;
use laurel_utils::embed::error_embed;
use laurel_utils::formatting::neutralize_mentions;
use laurel_utils::pagination::{page_window, paginate_embed_pages, total_pages};

pub const META: CommandMeta = CommandMeta {
    name: "showadmins",
    desc: "List every stored admin.",
    category: "admin",
    usage: "!showadmins [page]",
};

const ADMINS_PER_PAGE: usize = 10;

#[poise::command(prefix_command, slash_command, category = "Admin")]
pub async fn showadmins(
    ctx: Context<'_>,
    #[description = "Starting page"] page: Option<usize>,
) -> Result<(), Error> {
    if !require_privilege(ctx, Privilege::SuperAdmin).await? {
        return Ok(());
    }

    let admins = list_admins(&ctx.data().db).await?;
    if admins.is_empty() {
        ctx.send(reply_embed(error_embed("❌ There are no admins in the database.")))
            .await?;
        return Ok(());
    }

    let pages = admin_pages(&admins);
    paginate_embed_pages(ctx, "Admin List", &pages, page.unwrap_or(1)).await?;
    Ok(())
}

fn admin_pages(admins: &[AdminRecord]) -> Vec<String> {
    let total = total_pages(admins.len(), ADMINS_PER_PAGE);
    (1..=total)
        .map(|page| {
            let (start, end) = page_window(admins.len(), ADMINS_PER_PAGE, page);
            admins[start..end]
                .iter()
                .map(|admin| {
                    format!(
                        "**ID:** {}\n**Name:** {}\n**Added:** <t:{}:R>",
                        admin.user_id,
                        neutralize_mentions(&admin.name),
                        admin.added_at
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        })
        .collect()
}
