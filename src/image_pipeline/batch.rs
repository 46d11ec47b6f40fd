//! Batch conversion module
//!
//! Reads a work list, fans the inputs out over a bounded worker pool and
//! reports progress as files complete.

mod driver;
mod progress;
mod work_list;
pub mod types;

#[cfg(test)]
mod tests;

pub use driver::BatchConverter;
pub use progress::{ProgressCounter, ProgressReporter, StdoutProgress, format_progress};
pub use types::{BatchConfig, BatchSummary};
pub use work_list::{parse_work_list, read_work_list};
