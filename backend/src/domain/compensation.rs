//! Best-effort cleanup when a freshly created record cannot be handed back.
//!
//! If persistence succeeded but the response could not be produced, the new
//! record would be orphaned. The cleanup runs once; its own failure is logged
//! and never replaces the original error.

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

use super::Error;

/// Return `presented` unchanged, running `cleanup` first when it failed.
///
/// # Examples
/// ```
/// use profile_backend::domain::{Error, present_or_compensate};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let presented: Result<Vec<u8>, Error> = Err(Error::internal("encode failed"));
/// let result = present_or_compensate(presented, || async { Ok(()) }).await;
/// assert!(result.is_err());
/// # });
/// ```
pub async fn present_or_compensate<T, E, C, Fut>(presented: Result<T, E>, cleanup: C) -> Result<T, E>
where
    E: Display,
    C: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), Error>>,
{
    match presented {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Err(cleanup_err) = cleanup().await {
                warn!(
                    error = %err,
                    cleanup_error = %cleanup_err,
                    "compensating delete failed; record may be orphaned"
                );
            }
            Err(err)
        }
    }
}
