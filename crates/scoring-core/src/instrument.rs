//! Pass-through timing instrumentation.
//!
//! The original implementation wraps every scoring stage in a `@timeit()`
//! decorator that logs elapsed time through `loguru`. This is the same
//! idea without the decorator machinery: a small helper that times a
//! closure and logs the result at `debug`, and is otherwise invisible to
//! the caller. Dropping a logger implementation (never installing one)
//! makes this a no-op; nothing in the core depends on the log actually
//! going anywhere.

use std::time::Instant;

/// Runs `f`, logging its wall-clock duration under `label` at `debug`
/// level, and returns its result unchanged.
pub fn time_block<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    log::debug!("{label} took {:?}", start.elapsed());
    result
}
