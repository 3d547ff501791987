// Gateway module - controls public API for the timing filter

mod guard;
mod middleware;
mod request;
mod timing;

pub use middleware::track_timing;
pub use request::{ContextPath, RequestInfo, ResponseStatus};
pub use timing::TimingFilter;
