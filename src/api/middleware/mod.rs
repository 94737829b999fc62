pub mod verify;

use http::StatusCode;

pub type MiddlewareResult<T> = core::result::Result<T, StatusCode>;
