use ecomonitor_api::{
    parse_active_regions_params, parse_news_id, parse_region_digest_params, parse_search_params,
    ApiErrorCode,
};
use ecomonitor_query::QueryLimits;
use proptest::prelude::*;

fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn list_params_accept_repeats_and_commas() {
    let parsed = parse_search_params(&q(&[
        ("region_ids", "1,2"),
        ("region_ids", "7"),
        ("company_ids", ""),
        ("author_ids", "alice,,bob"),
    ]))
    .expect("params");
    assert_eq!(parsed.filter.region_ids, vec![1, 2, 7]);
    assert!(parsed.filter.company_ids.is_empty());
    assert_eq!(parsed.filter.author_ids, vec!["alice", "", "bob"]);
}

#[test]
fn malformed_numbers_and_flags_are_invalid_parameters() {
    for pairs in [
        vec![("page", "-1")],
        vec![("count", "ten")],
        vec![("byRelevance", "maybe")],
        vec![("region_ids", "1,x")],
    ] {
        let err = parse_search_params(&q(&pairs)).expect_err("invalid");
        assert_eq!(err.code, ApiErrorCode::InvalidQueryParameter, "{pairs:?}");
    }
}

#[test]
fn flags_and_user_are_parsed() {
    let parsed = parse_search_params(&q(&[
        ("byRelevance", "True"),
        ("newerToOlder", "false"),
        ("userId", "carol"),
        ("fromDate", "2024-01-01"),
        ("toDate", ""),
    ]))
    .expect("params");
    assert_eq!(parsed.filter.by_relevance, Some(true));
    assert_eq!(parsed.filter.newer_to_older, Some(false));
    assert_eq!(parsed.user_id.expect("user").as_str(), "carol");
    assert_eq!(parsed.filter.from_date.as_deref(), Some("2024-01-01"));
    assert_eq!(parsed.filter.to_date, None);
}

#[test]
fn news_id_must_be_a_non_negative_integer() {
    assert_eq!(parse_news_id("42").expect("id").get(), 42);
    assert_eq!(
        parse_news_id("-3").expect_err("negative").code,
        ApiErrorCode::InvalidQueryParameter
    );
    assert!(parse_news_id("abc").is_err());
}

#[test]
fn active_regions_bounds_and_windows() {
    let limits = QueryLimits::default();
    let none = parse_active_regions_params(&[], &limits).expect("defaults");
    assert_eq!(none.top_n, 0);
    assert!(none.window.is_none());

    let over = parse_active_regions_params(&q(&[("countOfRegions", "21")]), &limits)
        .expect_err("over limit");
    assert_eq!(over.code, ApiErrorCode::InvalidFilter);

    let half = parse_active_regions_params(
        &q(&[("countOfRegions", "3"), ("fromDate", "2024-01-01")]),
        &limits,
    )
    .expect_err("half open");
    assert_eq!(half.code, ApiErrorCode::InvalidFilter);

    let inverted = parse_active_regions_params(
        &q(&[("fromDate", "2024-02-01"), ("toDate", "2024-01-01")]),
        &limits,
    )
    .expect_err("inverted");
    assert_eq!(inverted.message, "FromDate must be less that toDate!");
}

#[test]
fn digest_requires_both_counts() {
    let limits = QueryLimits::default();
    let missing = parse_region_digest_params(&q(&[("regionsCount", "3")]), &limits)
        .expect_err("missing newsCount");
    assert_eq!(missing.code, ApiErrorCode::InvalidQueryParameter);
    let parsed = parse_region_digest_params(
        &q(&[("regionsCount", "3"), ("newsCount", "50")]),
        &limits,
    )
    .expect("params");
    assert_eq!((parsed.regions_count, parsed.news_per_region), (3, 50));
    assert!(parse_region_digest_params(
        &q(&[("regionsCount", "3"), ("newsCount", "51")]),
        &limits
    )
    .is_err());
}

proptest! {
    #[test]
    fn search_param_parsing_never_panics(
        pairs in proptest::collection::vec(
            (
                prop_oneof![
                    Just("page"), Just("count"), Just("byRelevance"), Just("newerToOlder"),
                    Just("fromDate"), Just("toDate"), Just("region_ids"), Just("author_ids"),
                    Just("company_ids"), Just("userId"),
                ],
                ".*",
            ),
            0..8,
        )
    ) {
        let query: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let _ = parse_search_params(&query);
    }
}
