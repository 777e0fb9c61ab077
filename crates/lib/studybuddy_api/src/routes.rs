//! Route paths.

pub const POST_API_CHAT: &str = "/api/chat";
pub const GET_API_CONFIG: &str = "/api/config";

/// Everything under `/api/` that no handler claims.
pub const ANY_API_UNMATCHED: &str = "/api/{*path}";
pub const ANY_API_ROOT: &str = "/api/";
