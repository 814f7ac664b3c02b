//! Process-wide spacing of outbound operations.

mod rate_limiter;

pub use rate_limiter::RateLimiter;
