// * Configuration Constants
// * Central location for all configurable thresholds and timeouts

// * Page fetch timeout per attempt, in milliseconds
pub const FETCH_TIMEOUT_MS: u64 = 20_000;

// * Minimum plausible body length for a rendered result page
pub const MIN_BODY_BYTES: usize = 200;

// * Concurrent lottery tasks per batch run
pub const WORKER_LIMIT: usize = 4;

// * Polite gap between requests against the same host, in milliseconds
pub const HOST_GAP_MS: u64 = 1_500;

// * Ordinal-marker occurrences required before a prize-count guess is accepted
pub const ORDINAL_MIN_OCCURRENCES: usize = 3;

// * A draw result never carries more than ten ranked prizes
pub const MAX_PRIZE_POSITIONS: usize = 10;

// * Default overdue threshold: values at least this many draws stale are reported
pub const DEFAULT_OVERDUE_THRESHOLD: usize = 10;
