//! Cross-cutting utility functions.
//!
//! - [`cores`] — CPU core counting via [`std::thread::available_parallelism`],
//!   the default used for [`crate::config::default_worker_count`].

pub mod cores;

pub use cores::count_cores;
