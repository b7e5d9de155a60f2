use std::sync::LockResult;

use tracing::warn;

/// Take the guard out of a lock result, recovering from poisoning.
///
/// Session and state values are plain data that stay consistent across a
/// panicking writer, so a poisoned lock is logged and used as-is.
pub(crate) fn recover<G>(result: LockResult<G>, owner: &'static str, op: &'static str) -> G {
    result.unwrap_or_else(|poisoned| {
        warn!(
            owner,
            op,
            result = "poisoned_recovered",
            "Recovered from poisoned lock"
        );
        poisoned.into_inner()
    })
}
