//! API middleware and request-context extractors

pub mod actor;
pub mod logging;
pub mod session;

pub use actor::CurrentActor;
pub use logging::logging_middleware;
pub use session::Session;
