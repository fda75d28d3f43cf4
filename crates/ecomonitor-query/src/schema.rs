// SPDX-License-Identifier: Apache-2.0

use rusqlite::Connection;

use crate::query_error::QueryError;

pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS region (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS company (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    region_id INTEGER NOT NULL REFERENCES region(id)
);
CREATE TABLE IF NOT EXISTS author (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS news (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL UNIQUE,
    body TEXT NOT NULL,
    post_date TEXT NOT NULL,
    update_date TEXT,
    source_url TEXT,
    like_count INTEGER NOT NULL DEFAULT 0 CHECK (like_count >= 0)
);
CREATE TABLE IF NOT EXISTS news_author (
    news_id INTEGER NOT NULL REFERENCES news(id) ON DELETE CASCADE,
    author_id TEXT NOT NULL REFERENCES author(id) ON DELETE CASCADE,
    PRIMARY KEY (news_id, author_id)
);
CREATE TABLE IF NOT EXISTS news_company (
    news_id INTEGER NOT NULL REFERENCES news(id) ON DELETE CASCADE,
    company_id INTEGER NOT NULL REFERENCES company(id) ON DELETE CASCADE,
    PRIMARY KEY (news_id, company_id)
);
CREATE TABLE IF NOT EXISTS news_region (
    news_id INTEGER NOT NULL REFERENCES news(id) ON DELETE CASCADE,
    region_id INTEGER NOT NULL REFERENCES region(id) ON DELETE CASCADE,
    PRIMARY KEY (news_id, region_id)
);
CREATE TABLE IF NOT EXISTS news_like (
    user_id TEXT NOT NULL,
    news_id INTEGER NOT NULL REFERENCES news(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, news_id)
) WITHOUT ROWID;
CREATE INDEX IF NOT EXISTS idx_news_post_date ON news(post_date, id);
CREATE INDEX IF NOT EXISTS idx_news_like_count ON news(like_count, id);
CREATE INDEX IF NOT EXISTS idx_news_like_news ON news_like(news_id);
CREATE INDEX IF NOT EXISTS idx_news_author_author ON news_author(author_id, news_id);
CREATE INDEX IF NOT EXISTS idx_news_company_company ON news_company(company_id, news_id);
CREATE INDEX IF NOT EXISTS idx_news_region_region ON news_region(region_id, news_id);
CREATE INDEX IF NOT EXISTS idx_company_region ON company(region_id, id);
CREATE VIEW IF NOT EXISTS news_region_membership AS
    SELECT news_id, region_id FROM news_region
    UNION
    SELECT nc.news_id, c.region_id
    FROM news_company nc
    JOIN company c ON c.id = nc.company_id;
";

/// Creates tables, indexes and views if missing and stamps `user_version`.
///
/// Safe to run on every start; a newer on-disk version is rejected.
pub fn apply_schema(conn: &Connection) -> Result<(), QueryError> {
    let current: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if current > SCHEMA_VERSION {
        return Err(QueryError::new(
            crate::QueryErrorCode::Sql,
            format!("store schema version {current} is newer than supported {SCHEMA_VERSION}"),
        ));
    }
    conn.execute_batch(SCHEMA_SQL)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
