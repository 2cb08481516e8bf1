use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;

use crate::cache::{ADMIN_CACHE_TTL, admin_membership_key, invalidate_admin_membership};
use crate::database::Database;
use crate::model::admins::AdminRecord;

#[derive(sqlx::FromRow)]
struct AdminRow {
    user_id: i64,
    name: String,
    added_at: i64,
}

pub async fn is_admin(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    let cache_key = admin_membership_key(db.cache(), user_id);
    db.cache()
        .get_or_load_json(&cache_key, ADMIN_CACHE_TTL, || async {
            let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

            let found: Option<i64> =
                sqlx::query_scalar("SELECT user_id FROM leveling_admins WHERE user_id = $1")
                    .bind(user_id_i64)
                    .fetch_optional(db.pool())
                    .await?;

            Ok::<_, anyhow::Error>(found.is_some())
        })
        .await
}

/// Add an admin. Returns `false` when the user already was one.
pub async fn add_admin(db: &Database, user_id: u64, name: &str) -> anyhow::Result<bool> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let added_at_i64 = i64::try_from(now_unix_secs()).context("added_at out of i64 range")?;

    let inserted = sqlx::query(
        "INSERT INTO leveling_admins (user_id, name, added_at)
         VALUES ($1, $2, $3)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id_i64)
    .bind(name)
    .bind(added_at_i64)
    .execute(db.pool())
    .await?
    .rows_affected();

    invalidate_admin_membership(db.cache(), user_id).await;

    Ok(inserted == 1)
}

/// Remove an admin. Returns `false` when the user was not one.
pub async fn remove_admin(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM leveling_admins WHERE user_id = $1")
        .bind(user_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    invalidate_admin_membership(db.cache(), user_id).await;

    Ok(deleted > 0)
}

pub async fn list_admins(db: &Database) -> anyhow::Result<Vec<AdminRecord>> {
    let rows: Vec<AdminRow> = sqlx::query_as(
        "SELECT user_id, name, added_at FROM leveling_admins ORDER BY added_at ASC, user_id ASC",
    )
    .fetch_all(db.pool())
    .await?;

    let mut admins = Vec::with_capacity(rows.len());
    for row in rows {
        admins.push(AdminRecord {
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            name: row.name,
            added_at: u64::try_from(row.added_at).context("added_at row out of u64 range")?,
        });
    }

    Ok(admins)
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
