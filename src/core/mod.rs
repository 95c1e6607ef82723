//! Runtime seams shared by the services.

pub mod time;

pub use time::{Clock, FixedClock, SystemClock};
