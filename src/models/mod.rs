// Start of file: /src/models/mod.rs

/*
    * Rows, request bodies and query filters for every resource
    * exposed by the API.
*/

pub mod client;
pub mod order;
pub mod product;
pub mod user;

use crate::utils::app_error::AppError;

const DEFAULT_LIMIT: i64 = 10;

/// Raw `limit`/`offset` query values
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Pagination {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    /// Returns `(limit, offset)`, enforcing `limit >= 1` and `offset >= 0`
    pub fn resolve(&self) -> Result<(i64, i64), AppError> {
        let limit: i64 = self.limit.unwrap_or(DEFAULT_LIMIT);
        let offset: i64 = self.offset.unwrap_or(0);

        if limit < 1 {
            return Err(AppError::BadRequest("limit must be greater than or equal to 1".into()));
        }
        if offset < 0 {
            return Err(AppError::BadRequest("offset must be greater than or equal to 0".into()));
        }

        Ok((limit, offset))
    }
}


// End of file: /src/models/mod.rs
