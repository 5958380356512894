use churnscope_http::{Problem, problem};

use crate::domain::error::DomainError;

/// Single mapping point from accounts domain errors to client-facing
/// Problems. Internal detail is logged here, never echoed.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = Problem::current_trace_id();

    let p = match e {
        DomainError::Validation { field, message } => {
            problem::bad_request(format!("{field}: {message}"))
        }
        DomainError::EmailTaken { .. } => problem::conflict("Email already registered"),
        DomainError::InvalidCredentials => problem::unauthorized("Invalid credentials"),
        DomainError::AccountNotFound { .. } => problem::not_found("Account not found"),
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "accounts database error");
            problem::internal_error("An internal error occurred")
        }
    };

    let p = p.with_instance(instance);
    match trace_id {
        Some(id) => p.with_trace_id(id),
        None => p,
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
