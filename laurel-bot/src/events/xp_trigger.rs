use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use laurel_core::Data;
use laurel_database::impls::progress::record_trigger_event;
use laurel_utils::COMMAND_PREFIX;
use laurel_utils::embed::SUCCESS_EMBED_COLOR;
use laurel_utils::formatting::neutralize_mentions;

/// Minimal view of a user for picking who receives XP.
pub trait XpCandidate {
    fn user_id(&self) -> u64;
    fn is_bot(&self) -> bool;
}

impl XpCandidate for serenity::User {
    fn user_id(&self) -> u64 {
        self.id.get()
    }

    fn is_bot(&self) -> bool {
        self.bot
    }
}

/// How the triggering message relates to an earlier one.
pub enum ReplySource<'a, T> {
    NotReply,
    /// A reply whose referenced message could not be resolved.
    Unresolved,
    Reply(&'a T),
}

/// Pick the user a trigger message rewards.
///
/// Replies reward the replied-to author; other messages reward the first
/// mention. Self-replies, self-mentions and bots receive nothing.
pub fn select_xp_target<'a, T: XpCandidate>(
    author_id: u64,
    reply: ReplySource<'a, T>,
    mentions: &'a [T],
) -> Option<&'a T> {
    match reply {
        ReplySource::Reply(replied) => {
            (replied.user_id() != author_id && !replied.is_bot()).then_some(replied)
        }
        ReplySource::Unresolved => None,
        ReplySource::NotReply => {
            if mentions.iter().any(|user| user.user_id() == author_id) {
                return None;
            }
            mentions.first().filter(|user| !user.is_bot())
        }
    }
}

/// Award one XP to the user a trigger message thanks, announcing level-ups in the channel.
pub async fn handle_message_xp(ctx: &serenity::Context, data: &Data, message: &serenity::Message) {
    // Ignore bots and webhooks.
    if message.author.bot || message.webhook_id.is_some() {
        return;
    }

    if message.content.trim_start().starts_with(COMMAND_PREFIX)
        || !data.triggers.matches(&message.content)
    {
        return;
    }

    let fetched;
    let reply = match (&message.referenced_message, &message.message_reference) {
        (Some(referenced), _) => ReplySource::Reply(&referenced.author),
        (None, Some(reference)) => match fetch_referenced(ctx, message, reference).await {
            Some(referenced) => {
                fetched = referenced;
                ReplySource::Reply(&fetched.author)
            }
            None => ReplySource::Unresolved,
        },
        (None, None) => ReplySource::NotReply,
    };

    let Some(target) = select_xp_target(message.author.id.get(), reply, &message.mentions) else {
        return;
    };

    let name = target
        .global_name
        .clone()
        .unwrap_or_else(|| target.name.clone());

    let grant = match record_trigger_event(&data.db, &data.leveling, target.id.get(), &name).await {
        Ok(grant) => grant,
        Err(source) => {
            error!(?source, user_id = target.id.get(), "failed to record xp event");
            return;
        }
    };

    let Some(level) = grant.level_up() else {
        return;
    };

    info!(user_id = target.id.get(), level, "user levelled up");
    notify_level_up(ctx, message.channel_id, &name, level).await;
}

async fn fetch_referenced(
    ctx: &serenity::Context,
    message: &serenity::Message,
    reference: &serenity::MessageReference,
) -> Option<serenity::Message> {
    let message_id = reference.message_id?;
    let channel_id = reference.channel_id;

    match channel_id.message(&ctx.http, message_id).await {
        Ok(referenced) => Some(referenced),
        Err(source) => {
            warn!(
                ?source,
                message_id = message.id.get(),
                referenced_id = message_id.get(),
                "referenced message unavailable; skipping xp"
            );
            None
        }
    }
}

async fn notify_level_up(
    ctx: &serenity::Context,
    channel_id: serenity::ChannelId,
    name: &str,
    level: i64,
) {
    let embed = serenity::CreateEmbed::new()
        .color(SUCCESS_EMBED_COLOR)
        .title(format!(
            "🎉 You've leveled up {}, congratulations!",
            neutralize_mentions(name)
        ))
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Your current level is {}.",
            level
        )));

    if let Err(source) = channel_id
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        error!(?source, channel_id = channel_id.get(), "failed to announce level up");
    }
}
