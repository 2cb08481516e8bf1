use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::embed::INFO_EMBED_COLOR;

pub const PAGINATION_TIMEOUT_SECS: u64 = 60 * 3;

pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    let per_page = per_page.max(1);
    total_items.div_ceil(per_page).max(1)
}

/// Half-open item range shown on 1-based `page`.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    (start, end)
}

fn page_embed(title: &str, description: &str, page: usize, total_pages: usize) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new()
        .color(INFO_EMBED_COLOR)
        .title(title.to_owned())
        .description(description.to_owned());

    if total_pages > 1 {
        embed.footer(serenity::CreateEmbedFooter::new(format!(
            "Page {}/{}",
            page + 1,
            total_pages
        )))
    } else {
        embed
    }
}

fn page_buttons(prev_id: &str, next_id: &str, page: usize, total_pages: usize) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(prev_id)
            .label("Prev")
            .disabled(page == 0)
            .style(serenity::ButtonStyle::Secondary),
        serenity::CreateButton::new(next_id)
            .label("Next")
            .disabled(page + 1 >= total_pages)
            .style(serenity::ButtonStyle::Secondary),
    ])]
}

/// Send `pages` as one embed with Prev/Next buttons for the invoking user.
///
/// Buttons stop responding after [`PAGINATION_TIMEOUT_SECS`]; the last page
/// shown stays in place without components.
pub async fn paginate_embed_pages<U, E>(
    ctx: poise::Context<'_, U, E>,
    title: &str,
    pages: &[String],
    start_page: usize,
) -> Result<(), serenity::Error>
where
    U: Send + Sync,
    E: Send + Sync,
{
    if pages.is_empty() {
        return Ok(());
    }

    let total = pages.len();
    let mut current = start_page.clamp(1, total) - 1;

    if total == 1 {
        ctx.send(poise::CreateReply::default().embed(page_embed(title, &pages[0], 0, 1)))
            .await?;
        return Ok(());
    }

    let ctx_id = ctx.id();
    let prev_id = format!("{}_prev", ctx_id);
    let next_id = format!("{}_next", ctx_id);

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(page_embed(title, &pages[current], current, total))
                .components(page_buttons(&prev_id, &next_id, current, total)),
        )
        .await?;

    let message = reply.message().await?;
    let message_id = message.id;
    let channel_id = message.channel_id;

    while let Some(press) = serenity::collector::ComponentInteractionCollector::new(ctx)
        .filter({
            let prefix = ctx_id.to_string();
            let author_id = ctx.author().id;
            move |interaction| {
                interaction.data.custom_id.starts_with(&prefix)
                    && interaction.user.id == author_id
                    && interaction.message.id == message_id
            }
        })
        .timeout(Duration::from_secs(PAGINATION_TIMEOUT_SECS))
        .await
    {
        if press.data.custom_id == next_id {
            current = (current + 1).min(total - 1);
        } else if press.data.custom_id == prev_id {
            current = current.saturating_sub(1);
        } else {
            continue;
        }

        press
            .create_response(
                ctx.http(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(page_embed(title, &pages[current], current, total))
                        .components(page_buttons(&prev_id, &next_id, current, total)),
                ),
            )
            .await?;
    }

    if let Err(source) = channel_id
        .edit_message(
            ctx.http(),
            message_id,
            serenity::EditMessage::new()
                .embed(page_embed(title, &pages[current], current, total))
                .components(vec![]),
        )
        .await
    {
        debug!(?source, "failed to strip pagination buttons");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{page_window, total_pages};

    #[test]
    fn counts_pages() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn windows_are_clamped() {
        assert_eq!(page_window(12, 5, 1), (0, 5));
        assert_eq!(page_window(12, 5, 3), (10, 12));
        assert_eq!(page_window(12, 5, 9), (12, 12));
    }
}
