use churnscope_http::{Problem, problem};

use crate::domain::error::{DomainError, OracleError};

/// Single mapping point from datasets domain errors to client-facing
/// Problems. Decode reasons describe the client's own upload and are safe to
/// echo; transport and database detail is logged, never echoed.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = Problem::current_trace_id();

    let p = match e {
        DomainError::Validation { field, message } => {
            problem::bad_request(format!("{field}: {message}"))
        }
        DomainError::Decode(decode) => problem::bad_request(decode.to_string()),
        DomainError::Oracle(oracle) => match oracle {
            OracleError::Unreachable(_) => {
                tracing::error!(error = ?oracle, "scoring service unreachable");
                problem::bad_gateway("Scoring service is unreachable")
            }
            OracleError::BadResponse(_) => {
                tracing::error!(error = ?oracle, "scoring service returned a bad response");
                problem::bad_gateway("Scoring service returned an invalid response")
            }
            OracleError::LengthMismatch { .. } => {
                tracing::error!(error = ?oracle, "scoring service row/probability mismatch");
                problem::bad_gateway(oracle.to_string())
            }
        },
        DomainError::DatasetNotFound { .. } => problem::not_found("Dataset not found"),
        DomainError::NotOwner { .. } => {
            problem::forbidden("Not allowed to access this dataset")
        }
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "datasets database error");
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
