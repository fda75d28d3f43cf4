// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;
use ecomonitor_model::{NewsId, NewsItem};

use crate::query_error::{QueryError, QueryErrorCode};

/// Column order matches [`crate::db::NEWS_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNewsRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub post_date: NaiveDateTime,
    pub update_date: Option<NaiveDateTime>,
    pub source_url: Option<String>,
    pub like_count: i64,
}

impl RawNewsRow {
    pub fn from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get::<_, i64>(0)?,
            title: row.get::<_, String>(1)?,
            body: row.get::<_, String>(2)?,
            post_date: row.get::<_, NaiveDateTime>(3)?,
            update_date: row.get::<_, Option<NaiveDateTime>>(4)?,
            source_url: row.get::<_, Option<String>>(5)?,
            like_count: row.get::<_, i64>(6)?,
        })
    }

    /// Associations are left empty; the loaders in `db` fill them per page.
    /// Rows that fail [`NewsItem::validate`] are reported as store corruption.
    pub fn into_item(self) -> Result<NewsItem, QueryError> {
        let id = NewsId::new(self.id)
            .map_err(|e| QueryError::new(QueryErrorCode::Sql, e.to_string()))?;
        let like_count = u64::try_from(self.like_count).map_err(|_| {
            QueryError::new(
                QueryErrorCode::Sql,
                format!("news {id} has negative like_count {}", self.like_count),
            )
        })?;
        let item = NewsItem {
            id,
            title: self.title,
            body: self.body,
            post_date: self.post_date,
            update_date: self.update_date,
            source_url: self.source_url,
            authors: Vec::new(),
            companies: Vec::new(),
            regions: Vec::new(),
            like_count,
        };
        item.validate().map_err(|e| {
            QueryError::new(QueryErrorCode::Sql, format!("corrupt news row {id}: {e}"))
        })?;
        Ok(item)
    }
}
