//! Standard middleware.
//!
//! Small, generally useful implementations of the [`Middleware`] capability.
//! Business middleware (auth, CORS, rate limiting, ...) lives in application
//! code and plugs in the same way.
//!
//! [`Middleware`]: trellis_core::Middleware

pub mod logging;
pub mod timing;

pub use logging::LoggingMiddleware;
pub use timing::TimingMiddleware;
