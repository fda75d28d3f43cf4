// SPDX-License-Identifier: Apache-2.0

//! Search constraints as composable predicates.
//!
//! Each constrained dimension becomes one [`Predicate`]; dimensions are
//! AND-ed, ids inside a dimension are OR-ed. Compilation yields SQL text with
//! positional `?` placeholders and the values to bind, in order.

use serde::{Deserialize, Serialize};

use crate::filters::{DateWindow, FilterCriteria, TIMESTAMP_FORMAT};
use ecomonitor_model::{AuthorId, CompanyId, RegionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<SqlParam>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    PostedWithin(DateWindow),
    InAnyRegion(Vec<RegionId>),
    ByAnyAuthor(Vec<AuthorId>),
    ForAnyCompany(Vec<CompanyId>),
}

#[must_use]
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn membership_clause(table: &str, column: &str, n: usize) -> String {
    format!(
        "n.id IN (SELECT news_id FROM {table} WHERE {column} IN ({}))",
        placeholders(n)
    )
}

impl Predicate {
    #[must_use]
    pub fn compile(&self) -> SqlFragment {
        match self {
            Self::PostedWithin(window) => SqlFragment {
                clause: "n.post_date BETWEEN ? AND ?".to_string(),
                params: vec![
                    SqlParam::Text(window.from.format(TIMESTAMP_FORMAT).to_string()),
                    SqlParam::Text(window.to.format(TIMESTAMP_FORMAT).to_string()),
                ],
            },
            Self::InAnyRegion(ids) => SqlFragment {
                clause: membership_clause("news_region_membership", "region_id", ids.len()),
                params: ids.iter().map(|id| SqlParam::Int(id.get())).collect(),
            },
            Self::ByAnyAuthor(ids) => SqlFragment {
                clause: membership_clause("news_author", "author_id", ids.len()),
                params: ids
                    .iter()
                    .map(|id| SqlParam::Text(id.as_str().to_string()))
                    .collect(),
            },
            Self::ForAnyCompany(ids) => SqlFragment {
                clause: membership_clause("news_company", "company_id", ids.len()),
                params: ids.iter().map(|id| SqlParam::Int(id.get())).collect(),
            },
        }
    }
}

/// The candidate set of a search, independent of ordering and paging.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    predicates: Vec<Predicate>,
}

impl FilterSpec {
    #[must_use]
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut predicates = Vec::new();
        if let Some(window) = criteria.window {
            predicates.push(Predicate::PostedWithin(window));
        }
        if !criteria.region_ids.is_empty() {
            predicates.push(Predicate::InAnyRegion(
                criteria.region_ids.iter().copied().collect(),
            ));
        }
        if !criteria.author_ids.is_empty() {
            predicates.push(Predicate::ByAnyAuthor(
                criteria.author_ids.iter().cloned().collect(),
            ));
        }
        if !criteria.company_ids.is_empty() {
            predicates.push(Predicate::ForAnyCompany(
                criteria.company_ids.iter().copied().collect(),
            ));
        }
        Self { predicates }
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// `WHERE ...` including the leading space, or empty when unconstrained.
    #[must_use]
    pub fn compile_where(&self) -> SqlFragment {
        if self.predicates.is_empty() {
            return SqlFragment::default();
        }
        let mut where_parts = Vec::with_capacity(self.predicates.len());
        let mut params = Vec::new();
        for predicate in &self.predicates {
            let fragment = predicate.compile();
            where_parts.push(fragment.clause);
            params.extend(fragment.params);
        }
        SqlFragment {
            clause: format!(" WHERE {}", where_parts.join(" AND ")),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Pagination;

    #[test]
    fn unconstrained_criteria_compile_to_nothing() {
        let spec = FilterSpec::from_criteria(&FilterCriteria::unconstrained(Pagination {
            page: 0,
            count: 10,
        }));
        assert!(spec.predicates().is_empty());
        assert_eq!(spec.compile_where(), SqlFragment::default());
    }

    #[test]
    fn dimensions_are_anded_and_ids_ored() {
        let mut criteria = FilterCriteria::unconstrained(Pagination { page: 0, count: 10 });
        criteria.region_ids.insert(RegionId::new(2).expect("id"));
        criteria.region_ids.insert(RegionId::new(1).expect("id"));
        criteria
            .author_ids
            .insert(AuthorId::parse("alice").expect("id"));
        let compiled = FilterSpec::from_criteria(&criteria).compile_where();
        assert_eq!(
            compiled.clause,
            " WHERE n.id IN (SELECT news_id FROM news_region_membership WHERE region_id IN (?, ?)) \
             AND n.id IN (SELECT news_id FROM news_author WHERE author_id IN (?))"
        );
        assert_eq!(
            compiled.params,
            vec![
                SqlParam::Int(1),
                SqlParam::Int(2),
                SqlParam::Text("alice".to_string())
            ]
        );
    }
}
