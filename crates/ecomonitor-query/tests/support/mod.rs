// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

use ecomonitor_query::apply_schema;
use rusqlite::{params, Connection};

pub fn open_store(conn: Connection) -> Connection {
    conn.pragma_update(None, "foreign_keys", true)
        .expect("foreign keys");
    apply_schema(&conn).expect("schema");
    conn
}

pub fn memory_store() -> Connection {
    open_store(Connection::open_in_memory().expect("open memory db"))
}

pub fn insert_region(conn: &Connection, id: i64, name: &str) {
    conn.execute(
        "INSERT INTO region (id, name) VALUES (?1, ?2)",
        params![id, name],
    )
    .expect("insert region");
}

pub fn insert_company(conn: &Connection, id: i64, name: &str, region_id: i64) {
    conn.execute(
        "INSERT INTO company (id, name, region_id) VALUES (?1, ?2, ?3)",
        params![id, name, region_id],
    )
    .expect("insert company");
}

#[derive(Debug, Clone, Default)]
pub struct NewsSeed<'a> {
    pub id: i64,
    pub post_date: &'a str,
    pub like_count: i64,
    pub regions: &'a [i64],
    pub companies: &'a [i64],
    pub authors: &'a [&'a str],
}

pub fn insert_news(conn: &Connection, seed: &NewsSeed<'_>) {
    conn.execute(
        "INSERT INTO news (id, title, body, post_date, like_count) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            seed.id,
            format!("news {}", seed.id),
            "body",
            seed.post_date,
            seed.like_count
        ],
    )
    .expect("insert news");
    for region in seed.regions {
        conn.execute(
            "INSERT INTO news_region (news_id, region_id) VALUES (?1, ?2)",
            params![seed.id, region],
        )
        .expect("tag region");
    }
    for company in seed.companies {
        conn.execute(
            "INSERT INTO news_company (news_id, company_id) VALUES (?1, ?2)",
            params![seed.id, company],
        )
        .expect("tag company");
    }
    for author in seed.authors {
        conn.execute(
            "INSERT OR IGNORE INTO author (id, name) VALUES (?1, ?1)",
            params![author],
        )
        .expect("insert author");
        conn.execute(
            "INSERT INTO news_author (news_id, author_id) VALUES (?1, ?2)",
            params![seed.id, author],
        )
        .expect("tag author");
    }
}

/// Seeds `n` news items spread over 2024, tagged round-robin with `regions`.
pub fn seed_daily(conn: &Connection, n: i64, regions: &[i64]) {
    for i in 0..n {
        let day = i % 28 + 1;
        let month = i / 28 % 12 + 1;
        let date = format!("2024-{month:02}-{day:02} {:02}:00:00", i % 24);
        let region = [regions[(i as usize) % regions.len()]];
        insert_news(
            conn,
            &NewsSeed {
                id: i + 1,
                post_date: &date,
                like_count: i % 7,
                regions: &region,
                ..NewsSeed::default()
            },
        );
    }
}

pub fn like_rows(conn: &Connection, news_id: i64) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM news_like WHERE news_id = ?1",
        params![news_id],
        |row| row.get(0),
    )
    .expect("count likes")
}

pub fn stored_like_count(conn: &Connection, news_id: i64) -> i64 {
    conn.query_row(
        "SELECT like_count FROM news WHERE id = ?1",
        params![news_id],
        |row| row.get(0),
    )
    .expect("like_count")
}
