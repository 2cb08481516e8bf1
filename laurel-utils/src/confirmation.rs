use std::time::Duration;

use poise::serenity_prelude as serenity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
    TimedOut,
}

/// Texts shown once the prompt resolves; buttons are removed in every case.
pub struct ConfirmationTexts<'a> {
    pub confirmed: &'a str,
    pub declined: &'a str,
    pub timed_out: &'a str,
}

/// Ask the invoking user to confirm a destructive action with Confirm/Decline buttons.
pub async fn confirm_or_decline<U, E>(
    ctx: poise::Context<'_, U, E>,
    embed: serenity::CreateEmbed,
    timeout: Duration,
    texts: ConfirmationTexts<'_>,
) -> Result<Confirmation, serenity::Error>
where
    U: Send + Sync,
    E: Send + Sync,
{
    let ctx_id = ctx.id();
    let confirm_id = format!("{}_confirm", ctx_id);
    let decline_id = format!("{}_decline", ctx_id);

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(embed)
                .components(vec![serenity::CreateActionRow::Buttons(vec![
                    serenity::CreateButton::new(&confirm_id)
                        .label("Confirm")
                        .style(serenity::ButtonStyle::Danger),
                    serenity::CreateButton::new(&decline_id)
                        .label("Decline")
                        .style(serenity::ButtonStyle::Secondary),
                ])]),
        )
        .await?;

    let message = reply.message().await?.into_owned();
    let interaction = message
        .await_component_interaction(ctx)
        .author_id(ctx.author().id)
        .timeout(timeout)
        .await;

    let Some(interaction) = interaction else {
        message
            .channel_id
            .edit_message(
                ctx.http(),
                message.id,
                serenity::EditMessage::new()
                    .content(texts.timed_out)
                    .embeds(vec![])
                    .components(vec![]),
            )
            .await?;
        return Ok(Confirmation::TimedOut);
    };

    let (outcome, text) = if interaction.data.custom_id == decline_id {
        (Confirmation::Declined, texts.declined)
    } else {
        (Confirmation::Confirmed, texts.confirmed)
    };

    interaction
        .create_response(
            ctx.http(),
            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .content(text)
                    .embeds(vec![])
                    .components(vec![]),
            ),
        )
        .await?;

    Ok(outcome)
}
