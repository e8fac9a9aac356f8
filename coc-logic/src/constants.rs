use std::time::Duration;

/// Upper bound for unpredicated collection scans (employees, libraries,
/// configuration).
pub const MAX_SCAN_DOCUMENTS: usize = 5_000;

/// How long a held advisory lock survives a crashed holder.
pub const LOCK_TTL: Duration = Duration::from_secs(30);

/// How long an acquirer waits before surfacing `StoreUnavailable`.
pub const LOCK_WAIT_DEADLINE: Duration = Duration::from_secs(10);
