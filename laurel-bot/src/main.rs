mod events;

use std::env;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use laurel_core::{Data, Error};
use laurel_database::{CacheService, Database, MIGRATOR};
use laurel_leveling::{LevelingConfig, SuperAdmins};
use laurel_utils::embed::ERROR_EMBED_COLOR;
use laurel_utils::triggers::TriggerWords;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let database_url = env::var("DATABASE_URL")?;
    let guild_id = match env::var("DISCORD_GUILD_ID") {
        Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u64>()?),
        _ => None,
    };

    let leveling = LevelingConfig::from_env()?;
    info!(
        level_xp_multiplier = leveling.level_xp_multiplier(),
        min_level_experience = leveling.min_level_experience(),
        max_level_experience = leveling.max_level_experience(),
        min_level = leveling.min_level(),
        max_level = leveling.max_level(),
        "Leveling rules loaded."
    );

    let super_admins = SuperAdmins::from_env()?;
    if super_admins.is_empty() {
        warn!("SUPER_ADMIN_IDS is empty; admin management commands will be unusable.");
    } else {
        info!(count = super_admins.len(), "Super admins loaded.");
    }

    let triggers = TriggerWords::from_env();
    info!(words = ?triggers.words(), "XP trigger words loaded.");

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    info!("PostgreSQL connection established.");

    let cache = build_cache().await;
    let db = Database::new(db_pool, cache);
    info!(redis = db.cache().is_redis_enabled(), "Database service ready.");

    if env_bool("AUTO_RUN_MIGRATIONS", true) {
        MIGRATOR.run(db.pool()).await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: laurel_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(laurel_utils::COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(bot = %ready.user.name, bot_id = ready.user.id.get(), "Laurel is ready.");

                match guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                        info!(guild_id, "Slash commands registered in guild.");
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        info!("Slash commands registered globally.");
                    }
                }

                ctx.set_presence(
                    Some(serenity::ActivityData::watching("you")),
                    serenity::OnlineStatus::Online,
                );

                Ok(Data {
                    db,
                    leveling,
                    super_admins,
                    triggers,
                })
            })
        })
        .build();

    info!("Laurel is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

async fn build_cache() -> CacheService {
    let key_prefix = env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "laurel:prod".to_string());

    if !env_bool("REDIS_ENABLED", false) {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        return CacheService::disabled(key_prefix);
    }

    let Ok(redis_url) = env::var("REDIS_URL") else {
        warn!(key_prefix = %key_prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with DB-only mode.");
        return CacheService::disabled(key_prefix);
    };

    let cache = match CacheService::redis(&redis_url, key_prefix.clone()) {
        Ok(cache) => {
            info!(key_prefix = %key_prefix, "Redis cache enabled.");
            cache
        }
        Err(err) => {
            warn!(?err, key_prefix = %key_prefix, "Failed to initialize Redis cache; continuing with DB-only mode.");
            return CacheService::disabled(key_prefix);
        }
    };

    match cache.ping().await {
        Ok(()) => info!("Redis cache health check passed."),
        Err(err) => warn!(
            ?err,
            "Redis cache ping failed; cache operations will continue with fallback behavior."
        ),
    }

    cache
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(ERROR_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = laurel_commands::COMMANDS
                .iter()
                .find(|meta| meta.name == ctx.command().name)
                .map(|meta| meta.usage.to_owned())
                .unwrap_or_else(|| format!("!{}", ctx.command().qualified_name));
            let description = match input {
                Some(input) => format!("Invalid argument: `{}`\nUsage: `{}`", input, usage),
                None => format!("Missing required argument.\nUsage: `{}`", usage),
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        events::xp_trigger::handle_message_xp(ctx, data, new_message).await;
    }

    Ok(())
}
