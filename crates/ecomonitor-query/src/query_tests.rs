// SPDX-License-Identifier: Apache-2.0

use super::*;
use ecomonitor_model::{AuthorId, CompanyId, NewsId, RegionId, UserId};
use rusqlite::Connection;

fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open memory db");
    apply_schema(&conn).expect("schema");
    conn.execute_batch(
        "
        INSERT INTO region (id, name) VALUES (1, 'North'), (2, 'South'), (3, 'East'), (5, 'Delta');
        INSERT INTO company (id, name, region_id) VALUES (10, 'AcmeChem', 2), (11, 'RiverPower', 5);
        INSERT INTO author (id, name) VALUES ('alice', 'Alice'), ('bob', 'Bob');
        INSERT INTO news (id, title, body, post_date, like_count) VALUES
          (1, 'n1', 'b', '2024-01-01 08:00:00', 3),
          (2, 'n2', 'b', '2024-01-01 23:59:59', 0),
          (3, 'n3', 'b', '2024-01-02 12:00:00', 1),
          (4, 'n4', 'b', '2024-01-03 00:00:00', 5),
          (5, 'n5', 'b', '2023-12-31 23:59:59', 2),
          (6, 'n6', 'b', '2024-01-02 09:00:00', 0);
        INSERT INTO news_region (news_id, region_id) VALUES (1, 5), (3, 5), (4, 5), (5, 1), (6, 1);
        INSERT INTO news_company (news_id, company_id) VALUES (2, 11), (3, 11), (5, 10);
        INSERT INTO news_author (news_id, author_id) VALUES (1, 'alice'), (2, 'bob');
        INSERT INTO news_like (user_id, news_id) VALUES ('carol', 1);
        ",
    )
    .expect("seed");
    conn
}

fn criteria(page: u32, count: u32) -> FilterCriteria {
    FilterCriteria::unconstrained(Pagination { page, count })
}

fn ids(page: &NewsPage) -> Vec<i64> {
    page.items.iter().map(|hit| hit.item.id.get()).collect()
}

#[test]
fn region_window_scenario_returns_three_items_and_ends() {
    let conn = setup_db();
    let raw = RawFilterParams {
        from_date: Some("2024-01-01".to_string()),
        to_date: Some("2024-01-02".to_string()),
        region_ids: vec![5],
        ..RawFilterParams::default()
    };
    let criteria = normalize_filter(&raw, &QueryLimits::default()).expect("criteria");
    let page = search_news(&conn, &criteria, None).expect("search");
    assert_eq!(ids(&page), vec![3, 2, 1]);
    assert_eq!(page.total_matches, 3);
    assert_eq!(page.remaining_count, 0);
    assert!(page.is_it_end);
}

#[test]
fn default_order_is_newest_first() {
    let conn = setup_db();
    let page = search_news(&conn, &criteria(0, 20), None).expect("search");
    assert_eq!(ids(&page), vec![4, 3, 6, 2, 1, 5]);
}

#[test]
fn relevance_orders_by_like_count_with_id_tie_break() {
    let conn = setup_db();
    let mut c = criteria(0, 20);
    c.order = NewsOrder::from_flags(true, true);
    assert_eq!(
        ids(&search_news(&conn, &c, None).expect("desc")),
        vec![4, 1, 5, 3, 2, 6]
    );
    c.order = NewsOrder::from_flags(true, false);
    assert_eq!(
        ids(&search_news(&conn, &c, None).expect("asc")),
        vec![2, 6, 3, 5, 1, 4]
    );
}

#[test]
fn pagination_reports_remaining_and_end() {
    let conn = setup_db();
    let first = search_news(&conn, &criteria(0, 4), None).expect("first");
    assert_eq!(first.items.len(), 4);
    assert_eq!(first.remaining_count, 2);
    assert!(!first.is_it_end);

    let second = search_news(&conn, &criteria(1, 4), None).expect("second");
    assert_eq!(ids(&second), vec![1, 5]);
    assert_eq!(second.remaining_count, 0);
    assert!(second.is_it_end);

    let beyond = search_news(&conn, &criteria(5, 4), None).expect("beyond");
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_matches, 6);
    assert!(beyond.is_it_end);
}

#[test]
fn zero_count_returns_empty_page_with_totals() {
    let conn = setup_db();
    let page = search_news(&conn, &criteria(0, 0), None).expect("search");
    assert!(page.items.is_empty());
    assert_eq!(page.total_matches, 6);
    assert_eq!(page.remaining_count, 6);
    assert!(!page.is_it_end);
}

#[test]
fn ids_within_a_dimension_are_ored_and_dimensions_anded() {
    let conn = setup_db();
    let mut c = criteria(0, 20);
    c.author_ids.insert(AuthorId::parse("alice").expect("id"));
    c.author_ids.insert(AuthorId::parse("bob").expect("id"));
    assert_eq!(ids(&search_news(&conn, &c, None).expect("or")), vec![2, 1]);

    c.region_ids.insert(RegionId::new(1).expect("id"));
    let page = search_news(&conn, &c, None).expect("and");
    assert!(page.items.is_empty());
    assert_eq!(page.total_matches, 0);
    assert!(page.is_it_end);
}

#[test]
fn company_filter_and_company_derived_regions() {
    let conn = setup_db();
    let mut c = criteria(0, 20);
    c.company_ids.insert(CompanyId::new(10).expect("id"));
    let page = search_news(&conn, &c, None).expect("search");
    assert_eq!(ids(&page), vec![5]);
    let regions: Vec<i64> = page.items[0]
        .item
        .regions
        .iter()
        .map(|r| r.id.get())
        .collect();
    assert_eq!(regions, vec![1, 2]);
}

#[test]
fn region_reached_by_tag_and_company_is_listed_once() {
    let conn = setup_db();
    let hit = get_news_by_id(&conn, NewsId::new(3).expect("id"), None).expect("lookup");
    assert_eq!(hit.item.regions.len(), 1);
    assert_eq!(hit.item.regions[0].name, "Delta");
    assert_eq!(hit.item.companies[0].name, "RiverPower");
    assert!(hit.liked_by_user.is_none());
}

#[test]
fn like_state_is_reported_only_for_a_requesting_user() {
    let conn = setup_db();
    let carol = UserId::parse("carol").expect("user");
    let page = search_news(&conn, &criteria(0, 20), Some(&carol)).expect("search");
    for hit in &page.items {
        assert_eq!(hit.liked_by_user, Some(hit.item.id.get() == 1));
    }
    let anonymous = search_news(&conn, &criteria(0, 20), None).expect("search");
    assert!(anonymous.items.iter().all(|hit| hit.liked_by_user.is_none()));
}

#[test]
fn lookup_reports_like_state_of_the_requesting_user() {
    let conn = setup_db();
    let id = NewsId::new(1).expect("id");
    let carol = UserId::parse("carol").expect("user");
    let dave = UserId::parse("dave").expect("user");
    let hit = get_news_by_id(&conn, id, Some(&carol)).expect("lookup");
    assert_eq!(hit.liked_by_user, Some(true));
    let hit = get_news_by_id(&conn, id, Some(&dave)).expect("lookup");
    assert_eq!(hit.liked_by_user, Some(false));
    let hit = get_news_by_id(&conn, id, None).expect("lookup");
    assert_eq!(hit.liked_by_user, None);
}

#[test]
fn rows_breaking_item_invariants_surface_as_store_errors() {
    let conn = setup_db();
    conn.execute_batch(
        "INSERT INTO news (id, title, body, post_date, update_date) VALUES
           (7, 'n7', 'b', '2024-02-02 00:00:00', '2024-02-01 00:00:00');",
    )
    .expect("insert");
    let err = get_news_by_id(&conn, NewsId::new(7).expect("id"), None).expect_err("corrupt");
    assert_eq!(err.code, QueryErrorCode::Sql);
    assert!(err.message.contains("corrupt news row 7"));
}

#[test]
fn missing_news_lookup_is_not_found() {
    let conn = setup_db();
    let err = get_news_by_id(&conn, NewsId::new(999).expect("id"), None).expect_err("missing");
    assert_eq!(err.code, QueryErrorCode::NotFound);
}

#[test]
fn toggle_like_twice_restores_state() {
    let mut conn = setup_db();
    let user = UserId::parse("userA").expect("user");
    let news = NewsId::new(2).expect("id");
    let first = toggle_like(&mut conn, &user, news).expect("like");
    assert!(first.liked);
    assert_eq!(first.like_count, 1);
    assert!(is_liked(&conn, &user, news).expect("state"));
    let second = toggle_like(&mut conn, &user, news).expect("unlike");
    assert!(!second.liked);
    assert_eq!(second.like_count, 0);
    assert!(!is_liked(&conn, &user, news).expect("state"));
}

#[test]
fn toggle_like_on_missing_news_changes_nothing() {
    let mut conn = setup_db();
    let user = UserId::parse("userA").expect("user");
    let err = toggle_like(&mut conn, &user, NewsId::new(999).expect("id")).expect_err("missing");
    assert_eq!(err.code, QueryErrorCode::NotFound);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM news_like", [], |row| row.get(0))
        .expect("count");
    assert_eq!(rows, 1);
}

#[test]
fn active_regions_rank_all_time_and_windowed() {
    let conn = setup_db();
    let all_time = active_regions(&conn, 20, None).expect("ranking");
    let summary: Vec<(i64, u64, u32)> = all_time
        .iter()
        .map(|a| (a.region.id.get(), a.count, a.rank))
        .collect();
    assert_eq!(summary, vec![(5, 4, 1), (1, 2, 2), (2, 1, 3)]);

    let window = normalize_date_window(Some("2024-01-01"), Some("2024-01-02"))
        .expect("window")
        .expect("some");
    let windowed = active_regions(&conn, 20, Some(&window)).expect("ranking");
    let summary: Vec<(i64, u64)> = windowed
        .iter()
        .map(|a| (a.region.id.get(), a.count))
        .collect();
    assert_eq!(summary, vec![(5, 3), (1, 1)]);
    assert!(active_regions(&conn, 0, None).expect("empty").is_empty());
}

#[test]
fn digest_lists_newest_items_per_top_region() {
    let conn = setup_db();
    let digest = region_digest(&conn, 2, 2).expect("digest");
    assert_eq!(digest.len(), 2);
    assert_eq!(digest[0].region.id.get(), 5);
    assert_eq!(digest[0].activity_count, 4);
    let first: Vec<i64> = digest[0].items.iter().map(|i| i.id.get()).collect();
    assert_eq!(first, vec![4, 3]);
    let second: Vec<i64> = digest[1].items.iter().map(|i| i.id.get()).collect();
    assert_eq!(second, vec![6, 5]);
}

fn tied_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open memory db");
    apply_schema(&conn).expect("schema");
    conn.execute_batch(
        "
        INSERT INTO region (id, name) VALUES (1, 'North');
        INSERT INTO news (id, title, body, post_date, like_count) VALUES
          (3, 't3', 'b', '2024-05-01 10:00:00', 2),
          (1, 't1', 'b', '2024-05-01 10:00:00', 2),
          (6, 't6', 'b', '2024-04-30 10:00:00', 0),
          (4, 't4', 'b', '2024-05-01 10:00:00', 2),
          (5, 't5', 'b', '2024-05-02 10:00:00', 7),
          (2, 't2', 'b', '2024-05-01 10:00:00', 2);
        INSERT INTO news_region (news_id, region_id)
          VALUES (1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (6, 1);
        ",
    )
    .expect("seed");
    conn
}

#[test]
fn equal_keys_are_ordered_by_id_ascending_in_both_directions() {
    let conn = tied_db();
    let mut c = criteria(0, 20);
    for (by_relevance, newer_to_older, expected) in [
        (false, true, vec![5, 1, 2, 3, 4, 6]),
        (false, false, vec![6, 1, 2, 3, 4, 5]),
        (true, true, vec![5, 1, 2, 3, 4, 6]),
        (true, false, vec![6, 1, 2, 3, 4, 5]),
    ] {
        c.order = NewsOrder::from_flags(by_relevance, newer_to_older);
        assert_eq!(
            ids(&search_news(&conn, &c, None).expect("search")),
            expected,
            "by_relevance={by_relevance} newer_to_older={newer_to_older}"
        );
    }
}

#[test]
fn pages_split_inside_a_tie_without_overlap() {
    let conn = tied_db();
    let pages: Vec<Vec<i64>> = (0..3)
        .map(|page| ids(&search_news(&conn, &criteria(page, 2), None).expect("page")))
        .collect();
    assert_eq!(pages, vec![vec![5, 1], vec![2, 3], vec![4, 6]]);
}

#[test]
fn digest_breaks_date_ties_by_id_descending() {
    let conn = tied_db();
    let digest = region_digest(&conn, 1, 4).expect("digest");
    let items: Vec<i64> = digest[0].items.iter().map(|i| i.id.get()).collect();
    assert_eq!(items, vec![5, 4, 3, 2]);
}

#[test]
fn explain_reports_a_plan_for_filtered_search() {
    let conn = setup_db();
    let mut c = criteria(0, 20);
    c.region_ids.insert(RegionId::new(5).expect("id"));
    let plan = explain_query_plan(
        &conn,
        &FilterSpec::from_criteria(&c),
        c.order,
        c.pagination,
    )
    .expect("plan");
    assert!(!plan.is_empty());
    assert!(plan.windows(2).all(|w| w[0] <= w[1]), "{plan:?}");
}
