// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! EcoMonitor news domain model.
//!
//! Entities here are plain data: the query engine produces them and the API
//! layer formats them. Nothing in this crate touches storage.

mod activity;
mod ids;
mod news;

pub use activity::RegionActivity;
pub use ids::{AuthorId, CompanyId, NewsId, ParseError, RegionId, UserId, ID_MAX_LEN};
pub use news::{AuthorRef, CompanyRef, NewsItem, Region, TITLE_MAX_LEN};

pub const CRATE_NAME: &str = "ecomonitor-model";
