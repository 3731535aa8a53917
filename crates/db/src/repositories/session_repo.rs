//! Repository for the `user_sessions` table.
//!
//! A session is usable while it is neither revoked nor expired. A refresh
//! token is redeemed by [`SessionRepo::rotate`], which revokes it and opens
//! its successor in one transaction, so each token can be redeemed once.

use sqlx::PgPool;
use surprise_core::types::DbId;

use crate::models::session::{NewSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                       user_agent, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Start a session for `user_id`.
    pub async fn open<'e, E>(
        executor: E,
        user_id: DbId,
        session: &NewSession,
    ) -> Result<UserSession, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, user_agent)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .bind(&session.refresh_token_hash)
            .bind(session.expires_at)
            .bind(&session.user_agent)
            .fetch_one(executor)
            .await
    }

    /// Redeem the usable session behind `token_hash` and open `next` for the
    /// same user.
    ///
    /// Returns `None`, leaving nothing changed, when the token is unknown,
    /// expired, already revoked, or redeemed by a concurrent call.
    pub async fn rotate(
        pool: &PgPool,
        token_hash: &str,
        next: &NewSession,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // The row lock makes a racing rotation re-check `is_revoked` after
        // this transaction commits, so only one of them matches.
        let redeemed: Option<(DbId,)> = sqlx::query_as(
            "UPDATE user_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(token_hash)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((user_id,)) = redeemed else {
            tx.rollback().await?;
            return Ok(None);
        };

        let session = Self::open(&mut *tx, user_id, next).await?;
        tx.commit().await?;
        Ok(Some(session))
    }

    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete sessions that can no longer be redeemed.
    pub async fn purge_unusable(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_sessions WHERE expires_at <= NOW() OR is_revoked = true")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
