// SPDX-License-Identifier: Apache-2.0

mod support;

use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use ecomonitor_model::{NewsId, UserId};
use ecomonitor_query::{toggle_like, QueryErrorCode};
use rusqlite::Connection;
use support::{insert_news, insert_region, like_rows, open_store, stored_like_count, NewsSeed};

fn open_writer(path: &Path) -> Connection {
    let conn = Connection::open(path).expect("open db file");
    conn.busy_timeout(Duration::from_secs(10))
        .expect("busy timeout");
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
        .expect("wal");
    conn
}

fn seeded_file() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("news.sqlite");
    let conn = open_store(open_writer(&path));
    insert_region(&conn, 1, "North");
    insert_news(
        &conn,
        &NewsSeed {
            id: 7,
            post_date: "2024-01-01 09:00:00",
            regions: &[1],
            ..NewsSeed::default()
        },
    );
    (dir, path)
}

#[test]
fn toggle_scenario_from_zero_likes() {
    let (_dir, path) = seeded_file();
    let mut conn = open_writer(&path);
    let user = UserId::parse("userA").expect("user");
    let news = NewsId::new(7).expect("id");

    let liked = toggle_like(&mut conn, &user, news).expect("toggle");
    assert!(liked.liked);
    assert_eq!(stored_like_count(&conn, 7), 1);

    let unliked = toggle_like(&mut conn, &user, news).expect("toggle");
    assert!(!unliked.liked);
    assert_eq!(stored_like_count(&conn, 7), 0);
    assert_eq!(like_rows(&conn, 7), 0);
}

#[test]
fn distinct_users_racing_keep_count_equal_to_rows() {
    let (_dir, path) = seeded_file();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut conn = open_writer(&path);
                let user = UserId::parse(&format!("user-{i}")).expect("user");
                barrier.wait();
                for _ in 0..3 {
                    toggle_like(&mut conn, &user, NewsId::new(7).expect("id")).expect("toggle");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("join");
    }

    let conn = open_writer(&path);
    assert_eq!(like_rows(&conn, 7), threads as i64);
    assert_eq!(stored_like_count(&conn, 7), threads as i64);
}

#[test]
fn same_pair_racing_never_double_inserts() {
    let (_dir, path) = seeded_file();
    let threads = 5;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut conn = open_writer(&path);
                let user = UserId::parse("shared").expect("user");
                barrier.wait();
                toggle_like(&mut conn, &user, NewsId::new(7).expect("id")).expect("toggle")
            })
        })
        .collect();
    let liked_outcomes = handles
        .into_iter()
        .map(|h| h.join().expect("join"))
        .filter(|t| t.liked)
        .count();

    let conn = open_writer(&path);
    let rows = like_rows(&conn, 7);
    assert_eq!(rows, 1, "odd number of toggles leaves the pair liked");
    assert_eq!(stored_like_count(&conn, 7), rows);
    assert_eq!(liked_outcomes, 3);
}

#[test]
fn unknown_news_is_not_found() {
    let (_dir, path) = seeded_file();
    let mut conn = open_writer(&path);
    let err = toggle_like(
        &mut conn,
        &UserId::parse("userA").expect("user"),
        NewsId::new(8).expect("id"),
    )
    .expect_err("missing news");
    assert_eq!(err.code, QueryErrorCode::NotFound);
    assert_eq!(like_rows(&conn, 8), 0);
}
