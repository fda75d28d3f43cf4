// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, BTreeSet};

use ecomonitor_model::{
    AuthorId, AuthorRef, CompanyId, CompanyRef, NewsItem, Region, RegionId, UserId,
};
use rusqlite::{params_from_iter, types::Value, Connection};

use crate::filters::{NewsOrder, Pagination, SortDirection, SortKey};
use crate::predicates::{placeholders, FilterSpec, SqlParam};
use crate::query_error::{QueryError, QueryErrorCode};
use crate::row_decode::RawNewsRow;

pub const NEWS_COLUMNS: &str =
    "n.id, n.title, n.body, n.post_date, n.update_date, n.source_url, n.like_count";

#[must_use]
pub fn bind_values(params: &[SqlParam]) -> Vec<Value> {
    params
        .iter()
        .map(|p| match p {
            SqlParam::Int(v) => Value::Integer(*v),
            SqlParam::Text(v) => Value::Text(v.clone()),
        })
        .collect()
}

#[must_use]
pub fn order_clause(order: NewsOrder) -> &'static str {
    match (order.key, order.direction) {
        (SortKey::PostDate, SortDirection::Descending) => " ORDER BY n.post_date DESC, n.id ASC",
        (SortKey::PostDate, SortDirection::Ascending) => " ORDER BY n.post_date ASC, n.id ASC",
        (SortKey::Relevance, SortDirection::Descending) => " ORDER BY n.like_count DESC, n.id ASC",
        (SortKey::Relevance, SortDirection::Ascending) => " ORDER BY n.like_count ASC, n.id ASC",
    }
}

#[must_use]
pub fn build_count_sql(spec: &FilterSpec) -> (String, Vec<Value>) {
    let compiled = spec.compile_where();
    (
        format!("SELECT COUNT(*) FROM news n{}", compiled.clause),
        bind_values(&compiled.params),
    )
}

#[must_use]
pub fn build_search_sql(
    spec: &FilterSpec,
    order: NewsOrder,
    pagination: Pagination,
) -> (String, Vec<Value>) {
    let compiled = spec.compile_where();
    let mut sql = format!("SELECT {NEWS_COLUMNS} FROM news n{}", compiled.clause);
    sql.push_str(order_clause(order));
    sql.push_str(" LIMIT ? OFFSET ?");
    let mut params = bind_values(&compiled.params);
    params.push(Value::Integer(i64::from(pagination.count)));
    params.push(Value::Integer(
        i64::try_from(pagination.offset()).unwrap_or(i64::MAX),
    ));
    (sql, params)
}

pub fn explain_query_plan(
    conn: &Connection,
    spec: &FilterSpec,
    order: NewsOrder,
    pagination: Pagination,
) -> Result<Vec<String>, QueryError> {
    let (sql, params) = build_search_sql(spec, order, pagination);
    let explain_sql = format!("EXPLAIN QUERY PLAN {sql}");
    let mut stmt = conn.prepare_cached(&explain_sql)?;
    let mut lines = stmt
        .query_map(params_from_iter(params.iter()), |row| row.get::<_, String>(3))?
        .collect::<Result<Vec<_>, _>>()?;
    lines.sort();
    Ok(lines)
}

pub fn count_matches(conn: &Connection, spec: &FilterSpec) -> Result<u64, QueryError> {
    let (sql, params) = build_count_sql(spec);
    let mut stmt = conn.prepare_cached(&sql)?;
    let total: i64 = stmt.query_row(params_from_iter(params.iter()), |row| row.get(0))?;
    Ok(u64::try_from(total).unwrap_or(0))
}

pub fn fetch_news_rows(
    conn: &Connection,
    sql: &str,
    params: &[Value],
) -> Result<Vec<NewsItem>, QueryError> {
    let mut stmt = conn.prepare_cached(sql)?;
    let raw = stmt
        .query_map(params_from_iter(params.iter()), RawNewsRow::from_sql_row)?
        .collect::<Result<Vec<_>, _>>()?;
    raw.into_iter().map(RawNewsRow::into_item).collect()
}

pub fn fetch_news_by_id(conn: &Connection, news_id: i64) -> Result<Option<NewsItem>, QueryError> {
    let sql = format!("SELECT {NEWS_COLUMNS} FROM news n WHERE n.id = ?1");
    let mut items = fetch_news_rows(conn, &sql, &[Value::Integer(news_id)])?;
    Ok(items.pop())
}

/// Newest items of one region, membership by tag or by company.
pub fn fetch_recent_for_region(
    conn: &Connection,
    region_id: RegionId,
    limit: u32,
) -> Result<Vec<NewsItem>, QueryError> {
    let sql = format!(
        "SELECT {NEWS_COLUMNS} FROM news n \
         WHERE n.id IN (SELECT news_id FROM news_region_membership WHERE region_id = ?) \
         ORDER BY n.post_date DESC, n.id DESC LIMIT ?"
    );
    fetch_news_rows(
        conn,
        &sql,
        &[
            Value::Integer(region_id.get()),
            Value::Integer(i64::from(limit)),
        ],
    )
}

fn corrupt(err: impl std::fmt::Display) -> QueryError {
    QueryError::new(QueryErrorCode::Sql, format!("corrupt association row: {err}"))
}

fn load_grouped<T>(
    conn: &Connection,
    sql: &str,
    ids: &[Value],
    decode: impl Fn(&rusqlite::Row<'_>) -> rusqlite::Result<(i64, Result<T, QueryError>)>,
) -> Result<BTreeMap<i64, Vec<T>>, QueryError> {
    let mut out: BTreeMap<i64, Vec<T>> = BTreeMap::new();
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params_from_iter(ids.iter()), decode)?;
    for row in rows {
        let (news_id, value) = row?;
        out.entry(news_id).or_default().push(value?);
    }
    Ok(out)
}

/// Fills authors, companies and regions of `items`, one query per association.
pub fn attach_associations(conn: &Connection, items: &mut [NewsItem]) -> Result<(), QueryError> {
    if items.is_empty() {
        return Ok(());
    }
    let ids: Vec<Value> = items
        .iter()
        .map(|item| Value::Integer(item.id.get()))
        .collect();
    let marks = placeholders(ids.len());

    let mut authors = load_grouped(
        conn,
        &format!(
            "SELECT na.news_id, a.id, a.name FROM news_author na \
             JOIN author a ON a.id = na.author_id \
             WHERE na.news_id IN ({marks}) ORDER BY na.news_id, a.id"
        ),
        &ids,
        |row| {
            let id: String = row.get(1)?;
            let name: String = row.get(2)?;
            Ok((
                row.get(0)?,
                AuthorId::parse(&id)
                    .map(|id| AuthorRef { id, name })
                    .map_err(corrupt),
            ))
        },
    )?;
    let mut companies = load_grouped(
        conn,
        &format!(
            "SELECT nc.news_id, c.id, c.name, c.region_id FROM news_company nc \
             JOIN company c ON c.id = nc.company_id \
             WHERE nc.news_id IN ({marks}) ORDER BY nc.news_id, c.id"
        ),
        &ids,
        |row| {
            let id: i64 = row.get(1)?;
            let name: String = row.get(2)?;
            let region_id: i64 = row.get(3)?;
            let decoded = CompanyId::new(id).and_then(|id| {
                RegionId::new(region_id).map(|region_id| CompanyRef {
                    id,
                    name,
                    region_id,
                })
            });
            Ok((row.get(0)?, decoded.map_err(corrupt)))
        },
    )?;
    let mut regions = load_grouped(
        conn,
        &format!(
            "SELECT m.news_id, r.id, r.name FROM news_region_membership m \
             JOIN region r ON r.id = m.region_id \
             WHERE m.news_id IN ({marks}) ORDER BY m.news_id, r.id"
        ),
        &ids,
        |row| {
            let id: i64 = row.get(1)?;
            let name: String = row.get(2)?;
            Ok((
                row.get(0)?,
                RegionId::new(id)
                    .map(|id| Region::new(id, name))
                    .map_err(corrupt),
            ))
        },
    )?;

    for item in items.iter_mut() {
        let key = item.id.get();
        item.authors = authors.remove(&key).unwrap_or_default();
        item.companies = companies.remove(&key).unwrap_or_default();
        item.regions = regions.remove(&key).unwrap_or_default();
    }
    Ok(())
}

/// Subset of `news_ids` the user has liked.
pub fn liked_news_ids(
    conn: &Connection,
    user: &UserId,
    news_ids: &[i64],
) -> Result<BTreeSet<i64>, QueryError> {
    if news_ids.is_empty() {
        return Ok(BTreeSet::new());
    }
    let sql = format!(
        "SELECT news_id FROM news_like WHERE user_id = ? AND news_id IN ({})",
        placeholders(news_ids.len())
    );
    let mut params = Vec::with_capacity(news_ids.len() + 1);
    params.push(Value::Text(user.as_str().to_string()));
    params.extend(news_ids.iter().map(|id| Value::Integer(*id)));
    let mut stmt = conn.prepare_cached(&sql)?;
    let liked = stmt
        .query_map(params_from_iter(params.iter()), |row| row.get::<_, i64>(0))?
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(liked)
}
