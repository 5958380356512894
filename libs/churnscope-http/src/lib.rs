//! HTTP response primitives shared by Churnscope modules.
//!
//! Every REST handler in this workspace returns [`ApiResult`]; failures are
//! rendered as RFC 9457 `application/problem+json` bodies via [`Problem`].

pub mod problem;

pub use problem::{APPLICATION_PROBLEM_JSON, Problem};

/// Result alias used by REST handlers: any error is already a renderable
/// [`Problem`].
pub type ApiResult<T> = Result<T, Problem>;
