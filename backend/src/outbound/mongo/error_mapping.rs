//! Classification of driver errors shared by both repositories.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Coarse category of a driver failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Failure {
    Duplicate,
    Connection,
    Query,
}

pub(super) fn classify(err: &MongoError) -> Failure {
    debug!(error = %err, "mongodb operation failed");
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
            Failure::Duplicate
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => Failure::Connection,
        _ => Failure::Query,
    }
}

/// Map `err` through per-repository constructors.
pub(super) fn map_mongo_error<E>(
    err: MongoError,
    duplicate: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
    query: impl FnOnce(String) -> E,
) -> E {
    let message = err.to_string();
    match classify(&err) {
        Failure::Duplicate => duplicate(message),
        Failure::Connection => connection(message),
        Failure::Query => query(message),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::io;

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn io_failures_are_connection_errors() {
        let err = MongoError::from(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert_eq!(classify(&err), Failure::Connection);
    }

    #[rstest]
    fn decode_failures_are_query_errors() {
        let decode = bson::from_bson::<i32>(bson::Bson::String("many".to_owned()))
            .expect_err("string is not an i32");
        let err = MongoError::from(decode);
        assert_eq!(classify(&err), Failure::Query);
    }
}
