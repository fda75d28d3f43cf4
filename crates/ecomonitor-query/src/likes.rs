// SPDX-License-Identifier: Apache-2.0

use ecomonitor_model::{NewsId, UserId};
use rusqlite::{params, Connection, TransactionBehavior};
use tracing::debug;

use crate::filters::LikeToggle;
use crate::query_error::{QueryError, QueryErrorCode};

/// Flips the like state of `(user, news_id)` and returns the new state.
///
/// Runs as one IMMEDIATE transaction: the write lock is taken before the
/// existence check, so concurrent toggles for the same pair serialize and the
/// stored `like_count` always equals the number of like rows.
pub fn toggle_like(
    conn: &mut Connection,
    user: &UserId,
    news_id: NewsId,
) -> Result<LikeToggle, QueryError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let removed = tx.execute(
        "DELETE FROM news_like WHERE user_id = ?1 AND news_id = ?2",
        params![user.as_str(), news_id.get()],
    )?;
    let liked = if removed == 0 {
        let inserted = tx.execute(
            "INSERT INTO news_like (user_id, news_id) SELECT ?1, id FROM news WHERE id = ?2",
            params![user.as_str(), news_id.get()],
        )?;
        if inserted == 0 {
            return Err(QueryError::not_found(format!("news {news_id} not found")));
        }
        true
    } else {
        false
    };
    let delta: i64 = if liked { 1 } else { -1 };
    let like_count: i64 = tx.query_row(
        "UPDATE news SET like_count = like_count + ?1 WHERE id = ?2 RETURNING like_count",
        params![delta, news_id.get()],
        |row| row.get(0),
    )?;
    tx.commit()?;
    debug!(news_id = news_id.get(), liked, like_count, "like toggled");
    Ok(LikeToggle {
        news_id,
        liked,
        like_count: u64::try_from(like_count).map_err(|_| {
            QueryError::new(
                QueryErrorCode::Sql,
                format!("news {news_id} like_count went negative"),
            )
        })?,
    })
}

/// Whether `user` currently likes `news_id`.
pub fn is_liked(conn: &Connection, user: &UserId, news_id: NewsId) -> Result<bool, QueryError> {
    let hits: i64 = conn.query_row(
        "SELECT COUNT(*) FROM news_like WHERE user_id = ?1 AND news_id = ?2",
        params![user.as_str(), news_id.get()],
        |row| row.get(0),
    )?;
    Ok(hits > 0)
}
