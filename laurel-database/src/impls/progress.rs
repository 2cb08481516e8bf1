use anyhow::Context as _;
use sqlx::PgConnection;
use tracing::debug;

use laurel_leveling::{BulkGrant, EventGrant, LevelingConfig, Progress, Standing};

use crate::cache::{LEADERBOARD_CACHE_TTL, invalidate_leaderboard, leaderboard_key};
use crate::database::Database;
use crate::model::leveling::{StoredOverride, UserProgress};

#[derive(sqlx::FromRow)]
struct ProgressRow {
    user_id: i64,
    name: String,
    level: i64,
    xp: i64,
}

impl ProgressRow {
    fn into_user_progress(self) -> anyhow::Result<UserProgress> {
        Ok(UserProgress {
            user_id: u64::try_from(self.user_id).context("user_id row out of u64 range")?,
            name: self.name,
            progress: Progress::new(
                u64::try_from(self.xp).context("xp row out of u64 range")?,
                self.level,
            ),
        })
    }
}

pub async fn get_progress(db: &Database, user_id: u64) -> anyhow::Result<Option<UserProgress>> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let row: Option<ProgressRow> = sqlx::query_as(
        "SELECT user_id, name, level, xp FROM leveling_users WHERE user_id = $1",
    )
    .bind(user_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(ProgressRow::into_user_progress).transpose()
}

/// Apply one trigger event to `user_id` inside a single transaction.
pub async fn record_trigger_event(
    db: &Database,
    config: &LevelingConfig,
    user_id: u64,
    name: &str,
) -> anyhow::Result<EventGrant> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let mut tx = db.pool().begin().await?;

    let registration = config.grant_event_xp(None);
    let grant = if insert_if_absent(&mut *tx, user_id_i64, name, registration.progress()).await? {
        registration
    } else {
        let current = lock_progress(&mut *tx, user_id_i64).await?;
        let grant = config.grant_event_xp(Some(current));
        store_progress(&mut *tx, user_id_i64, name, grant.progress()).await?;
        grant
    };

    tx.commit().await?;
    invalidate_leaderboard(db.cache()).await;

    debug!(user_id, ?grant, "trigger event recorded");
    Ok(grant)
}

/// Grant `amount` XP to `user_id` inside a single transaction.
pub async fn grant_xp(
    db: &Database,
    config: &LevelingConfig,
    user_id: u64,
    name: &str,
    amount: u64,
) -> anyhow::Result<BulkGrant> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let mut tx = db.pool().begin().await?;

    let registration = config.grant_bulk_xp(None, amount);
    let grant = if insert_if_absent(&mut *tx, user_id_i64, name, registration.progress).await? {
        registration
    } else {
        let current = lock_progress(&mut *tx, user_id_i64).await?;
        let grant = config.grant_bulk_xp(Some(current), amount);
        store_progress(&mut *tx, user_id_i64, name, grant.progress).await?;
        grant
    };

    tx.commit().await?;
    invalidate_leaderboard(db.cache()).await;

    Ok(grant)
}

/// Set `user_id`'s level directly, creating the record when missing.
pub async fn override_level(
    db: &Database,
    config: &LevelingConfig,
    user_id: u64,
    name: &str,
    requested_level: i64,
) -> anyhow::Result<StoredOverride> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let level_override = config.override_level(requested_level);

    let mut tx = db.pool().begin().await?;
    let inserted = insert_if_absent(&mut *tx, user_id_i64, name, level_override.progress).await?;
    if !inserted {
        store_progress(&mut *tx, user_id_i64, name, level_override.progress).await?;
    }
    tx.commit().await?;

    invalidate_leaderboard(db.cache()).await;

    Ok(StoredOverride {
        progress: level_override.progress,
        clamp: level_override.clamp,
        inserted,
    })
}

/// Delete one user's progress. Returns whether a record existed.
pub async fn delete_progress(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM leveling_users WHERE user_id = $1")
        .bind(user_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    invalidate_leaderboard(db.cache()).await;

    Ok(deleted > 0)
}

pub async fn delete_all_progress(db: &Database) -> anyhow::Result<u64> {
    let deleted = sqlx::query("DELETE FROM leveling_users")
        .execute(db.pool())
        .await?
        .rows_affected();

    invalidate_leaderboard(db.cache()).await;

    Ok(deleted)
}

/// Every stored standing, served from the leaderboard cache when available.
pub async fn list_standings(db: &Database) -> anyhow::Result<Vec<Standing>> {
    let cache_key = leaderboard_key(db.cache());
    db.cache()
        .get_or_load_json(&cache_key, LEADERBOARD_CACHE_TTL, || async {
            let rows: Vec<ProgressRow> = sqlx::query_as(
                "SELECT user_id, name, level, xp
                 FROM leveling_users
                 ORDER BY level DESC, xp DESC, user_id ASC",
            )
            .fetch_all(db.pool())
            .await?;

            rows.into_iter()
                .map(|row| -> anyhow::Result<Standing> {
                    let entry = row.into_user_progress()?;
                    Ok(Standing {
                        user_id: entry.user_id,
                        name: entry.name,
                        level: entry.progress.level,
                        xp: entry.progress.xp,
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .await
}

async fn insert_if_absent(
    conn: &mut PgConnection,
    user_id: i64,
    name: &str,
    progress: Progress,
) -> anyhow::Result<bool> {
    let xp = i64::try_from(progress.xp).context("xp out of i64 range")?;

    let inserted = sqlx::query(
        "INSERT INTO leveling_users (user_id, name, level, xp)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(name)
    .bind(progress.level)
    .bind(xp)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    Ok(inserted == 1)
}

async fn lock_progress(conn: &mut PgConnection, user_id: i64) -> anyhow::Result<Progress> {
    let (level, xp): (i64, i64) =
        sqlx::query_as("SELECT level, xp FROM leveling_users WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?
            .with_context(|| format!("progress for user {user_id} vanished mid-transaction"))?;

    Ok(Progress::new(
        u64::try_from(xp).context("xp row out of u64 range")?,
        level,
    ))
}

async fn store_progress(
    conn: &mut PgConnection,
    user_id: i64,
    name: &str,
    progress: Progress,
) -> anyhow::Result<()> {
    let xp = i64::try_from(progress.xp).context("xp out of i64 range")?;

    sqlx::query("UPDATE leveling_users SET name = $2, level = $3, xp = $4 WHERE user_id = $1")
        .bind(user_id)
        .bind(name)
        .bind(progress.level)
        .bind(xp)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use laurel_leveling::{EventGrant, LevelClamp, LevelingConfig, Progress};

    use super::{
        delete_all_progress, delete_progress, get_progress, grant_xp, list_standings,
        override_level, record_trigger_event,
    };
    use crate::cache::CacheService;
    use crate::database::Database;

    fn database(pool: PgPool) -> Database {
        Database::new(pool, CacheService::disabled("laurel:test"))
    }

    // multiplier 1.0, min exp 5, max exp 500, levels 0..=100
    fn config() -> LevelingConfig {
        LevelingConfig::default()
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn first_trigger_event_only_registers(pool: PgPool) -> anyhow::Result<()> {
        let db = database(pool);

        let first = record_trigger_event(&db, &config(), 11, "alice").await?;
        assert_eq!(first, EventGrant::Registered(Progress::new(0, 0)));

        let stored = get_progress(&db, 11).await?.expect("registered user");
        assert_eq!(stored.progress, Progress::new(0, 0));
        assert_eq!(stored.name, "alice");

        let second = record_trigger_event(&db, &config(), 11, "alice").await?;
        assert_eq!(second.progress(), Progress::new(1, 0));
        assert_eq!(second.level_up(), None);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn trigger_event_persists_level_up(pool: PgPool) -> anyhow::Result<()> {
        let db = database(pool);
        record_trigger_event(&db, &config(), 12, "bob").await?;

        // level 0 costs 5
        let mut last = None;
        for _ in 0..5 {
            last = Some(record_trigger_event(&db, &config(), 12, "bob").await?);
        }
        assert_eq!(last.map(|grant| grant.level_up()), Some(Some(1)));

        let stored = get_progress(&db, 12).await?.expect("stored user");
        assert_eq!(stored.progress, Progress::new(0, 1));
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn bulk_grant_registers_unseen_user_at_level_one(pool: PgPool) -> anyhow::Result<()> {
        let db = database(pool);

        let grant = grant_xp(&db, &config(), 21, "carol", 3).await?;
        assert!(grant.registered);
        assert_eq!(grant.progress, Progress::new(3, 1));

        // 2 more reach the level 1 threshold of 5, 4 carry over
        let grant = grant_xp(&db, &config(), 21, "carol", 6).await?;
        assert!(!grant.registered);
        assert_eq!(grant.progress, Progress::new(4, 2));
        assert_eq!(grant.levels_gained, 1);

        let stored = get_progress(&db, 21).await?.expect("stored user");
        assert_eq!(stored.progress, Progress::new(4, 2));
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn override_reports_insertion_and_clamp(pool: PgPool) -> anyhow::Result<()> {
        let db = database(pool);

        let created = override_level(&db, &config(), 31, "dave", 1_000).await?;
        assert!(created.inserted);
        assert_eq!(created.clamp, LevelClamp::ClampedToMax);
        assert_eq!(created.progress, Progress::new(0, 100));

        grant_xp(&db, &config(), 31, "dave", 1).await?;
        let updated = override_level(&db, &config(), 31, "dave", 7).await?;
        assert!(!updated.inserted);
        assert_eq!(updated.clamp, LevelClamp::Unclamped);

        let stored = get_progress(&db, 31).await?.expect("stored user");
        assert_eq!(stored.progress, Progress::new(0, 7));
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn delete_removes_exactly_one_record(pool: PgPool) -> anyhow::Result<()> {
        let db = database(pool);
        override_level(&db, &config(), 41, "erin", 3).await?;
        override_level(&db, &config(), 42, "frank", 4).await?;

        assert!(delete_progress(&db, 41).await?);
        assert!(get_progress(&db, 41).await?.is_none());
        assert!(get_progress(&db, 42).await?.is_some());
        assert!(!delete_progress(&db, 41).await?);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn delete_all_wipes_every_record(pool: PgPool) -> anyhow::Result<()> {
        let db = database(pool);
        for user_id in 51..54 {
            override_level(&db, &config(), user_id, "user", 2).await?;
        }

        assert_eq!(delete_all_progress(&db).await?, 3);
        assert!(list_standings(&db).await?.is_empty());
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn standings_are_ordered_by_level_then_xp_then_id(pool: PgPool) -> anyhow::Result<()> {
        let db = database(pool);
        override_level(&db, &config(), 63, "low", 1).await?;
        override_level(&db, &config(), 62, "tied-b", 5).await?;
        override_level(&db, &config(), 61, "tied-a", 5).await?;
        grant_xp(&db, &config(), 64, "ahead", 2).await?;
        override_level(&db, &config(), 64, "ahead", 5).await?;
        grant_xp(&db, &config(), 64, "ahead", 2).await?;

        let order: Vec<u64> = list_standings(&db)
            .await?
            .into_iter()
            .map(|standing| standing.user_id)
            .collect();
        assert_eq!(order, vec![64, 61, 62, 63]);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    async fn unreachable_cache_does_not_fail_committed_writes(pool: PgPool) -> anyhow::Result<()> {
        let cache = CacheService::redis("redis://127.0.0.1:1", "laurel:test")?;
        let db = Database::new(pool, cache);

        record_trigger_event(&db, &config(), 71, "gina").await?;
        let grant = grant_xp(&db, &config(), 71, "gina", 5).await?;
        assert_eq!(grant.progress, Progress::new(0, 1));
        override_level(&db, &config(), 71, "gina", 2).await?;
        assert!(delete_progress(&db, 71).await?);
        Ok(())
    }
}
