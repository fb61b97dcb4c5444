//! Constants used throughout the datanode library.

/// Separator between the segments of a path (`user.profile.name`).
pub const PATH_SEPARATOR: char = '.';

/// Default tracing directive installed by binaries and the test harness.
pub const DEFAULT_LOG_DIRECTIVE: &str = "datanode=info";
