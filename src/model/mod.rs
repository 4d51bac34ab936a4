mod labels;
mod name;
mod sample;
mod timestamp;

pub use labels::*;
pub use name::{MetricName, Suffix};
pub use sample::*;
pub use timestamp::*;

pub(crate) use sample::format_timestamp;
