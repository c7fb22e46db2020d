//! Bounded-retry combinator with a degrade value.
//!
//! "Best-effort repeated attempts with bounded cost": run an operation up
//! to a fixed number of times, and if every attempt fails, produce a
//! degrade value instead of propagating the error. Reusable across any
//! cheap-tier call site.

use tracing::warn;

/// Run `op` up to `attempts` times (at least once). Returns the first
/// success, or `degrade(last_error)` after exhaustion.
///
/// Attempts are independent and stateless; there is no inter-attempt delay.
/// The attempt number (1-based) is passed to `op` for logging.
pub async fn retry_with_degrade<T, E, Fut>(
    attempts: usize,
    mut op: impl FnMut(usize) -> Fut,
    degrade: impl FnOnce(E) -> T,
) -> T
where
    Fut: Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = attempts.max(1);

    let mut last_err = match op(1).await {
        Ok(value) => return value,
        Err(e) => e,
    };

    for attempt in 2..=attempts {
        warn!(attempt = attempt - 1, error = %last_err, "Attempt failed, retrying");
        match op(attempt).await {
            Ok(value) => return value,
            Err(e) => last_err = e,
        }
    }

    warn!(attempts, error = %last_err, "All attempts failed, degrading");
    degrade(last_err)
}
