//! Shared response envelope for read endpoints.
//!
//! The survey creation endpoint returns the created row bare; lookups wrap
//! their payload in `{ "data": ... }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
