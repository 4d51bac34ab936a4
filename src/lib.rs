//! OpenMetrics text exposition.
//!
//! Metric names, labels and samples are validated when they are built;
//! rendering a value that was built successfully cannot fail.
//!
//! ```
//! use openmetrics_text::metrics::Counter;
//! use openmetrics_text::model::{Label, ProvidesSampleString};
//!
//! # fn main() -> openmetrics_text::error::Result<()> {
//! let counter = Counter::from_value_and_timestamp(5.0, 1620000000)?
//!     .with_labels(vec![Label::new("job", "api")?])?;
//! assert_eq!(r#"_total{job="api"} 5.000000 1620000000"#, counter.sample_string());
//! # Ok(())
//! # }
//! ```

pub mod cliopt;
pub mod error;
pub mod input;
pub mod metrics;
pub mod model;
pub mod output;
pub mod runner;
