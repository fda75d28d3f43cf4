// SPDX-License-Identifier: Apache-2.0

use crate::normalize::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryErrorCode {
    InvalidFilter,
    NotFound,
    /// The store lock was not granted within the busy timeout; nothing was written.
    Busy,
    Sql,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code:?}: {message}")]
pub struct QueryError {
    pub code: QueryErrorCode,
    pub message: String,
}

impl QueryError {
    #[must_use]
    pub fn new(code: QueryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::new(QueryErrorCode::InvalidFilter, message)
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(QueryErrorCode::NotFound, message)
    }
}

impl From<FilterError> for QueryError {
    fn from(value: FilterError) -> Self {
        Self::invalid_filter(value.to_string())
    }
}

impl From<rusqlite::Error> for QueryError {
    fn from(value: rusqlite::Error) -> Self {
        let code = match &value {
            rusqlite::Error::SqliteFailure(e, _)
                if matches!(
                    e.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                QueryErrorCode::Busy
            }
            _ => QueryErrorCode::Sql,
        };
        Self::new(code, value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_contention_is_not_a_store_failure() {
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        );
        assert_eq!(QueryError::from(busy).code, QueryErrorCode::Busy);
        let other = rusqlite::Error::QueryReturnedNoRows;
        assert_eq!(QueryError::from(other).code, QueryErrorCode::Sql);
    }
}
