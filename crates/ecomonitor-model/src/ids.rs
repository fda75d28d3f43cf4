// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const ID_MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} must not contain leading/trailing whitespace")]
    Trimmed(&'static str),
    #[error("{0} exceeds max length {1}")]
    TooLong(&'static str, usize),
    #[error("{0} must be >= 0")]
    Negative(&'static str),
    #[error("{0}")]
    InvalidFormat(&'static str),
}

fn parse_text_id(input: &str, field: &'static str) -> Result<String, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty(field));
    }
    if input.trim() != input {
        return Err(ParseError::Trimmed(field));
    }
    if input.len() > ID_MAX_LEN {
        return Err(ParseError::TooLong(field, ID_MAX_LEN));
    }
    Ok(input.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsId(i64);

impl NewsId {
    pub fn new(raw: i64) -> Result<Self, ParseError> {
        if raw < 0 {
            return Err(ParseError::Negative("news_id"));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(i64);

impl RegionId {
    pub fn new(raw: i64) -> Result<Self, ParseError> {
        if raw < 0 {
            return Err(ParseError::Negative("region_id"));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(i64);

impl CompanyId {
    pub fn new(raw: i64) -> Result<Self, ParseError> {
        if raw < 0 {
            return Err(ParseError::Negative("company_id"));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Opaque id of an authenticated caller, as handed over by the identity layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse_text_id(input, "user_id").map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Authors are users; the id space is shared with [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(String);

impl AuthorId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse_text_id(input, "author_id").map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NewsId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for RegionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for CompanyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for AuthorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
