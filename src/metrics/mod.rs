mod aggregations;
mod counter;
mod family;
mod gauge;
mod histogram;
mod summary;

pub use aggregations::{Count, Sum};
pub use counter::Counter;
pub use family::{exposition, MetricFamily, EOF_MARKER};
pub use gauge::Gauge;
pub use histogram::Histogram;
pub use summary::Summary;

use std::convert::TryFrom;
use std::fmt;

use crate::error::{Error, Result};
use crate::model::{
    format_timestamp, Label, LabelSet, MetricName, ProvidesSampleString, Sample, SampleValue, Suffix,
    Timestamp,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Summary,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
            MetricType::Histogram => "histogram",
            MetricType::Summary => "summary",
        }
    }

    /// Sample name suffixes a family of this type may use.
    pub fn suffixes(&self) -> &'static [Suffix] {
        match self {
            MetricType::Counter => &[Suffix::Total, Suffix::Created],
            MetricType::Gauge => &[],
            MetricType::Histogram => &[Suffix::Bucket, Suffix::Count, Suffix::Sum, Suffix::Created],
            MetricType::Summary => &[Suffix::Count, Suffix::Sum, Suffix::Created],
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MetricType {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        match s {
            "counter" => Ok(MetricType::Counter),
            "gauge" => Ok(MetricType::Gauge),
            "histogram" => Ok(MetricType::Histogram),
            "summary" => Ok(MetricType::Summary),
            _ => Err(Error::invalid_argument(format!("Unknown metric type '{}'", s))),
        }
    }
}

/// A typed metric instance: one label set and the values observed for it.
///
/// Builders validate on construction and on every label they accept, so
/// rendering never fails.
pub trait Metric: ProvidesSampleString + fmt::Debug + Send + Sync {
    fn metric_type(&self) -> MetricType;

    fn labels(&self) -> &LabelSet;

    /// Freezes the metric into the exposition lines it produces under `name`.
    fn samples(&self, name: &MetricName) -> Vec<Sample>;

    fn render(&self, name: &MetricName) -> String {
        self.samples(name)
            .iter()
            .map(Sample::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// A line without the base name: `<suffix><labels> <value>[ <timestamp>]`.
pub(crate) fn fragment(
    suffix: Option<Suffix>,
    labels: &LabelSet,
    value: SampleValue,
    timestamp: Option<Timestamp>,
) -> String {
    format!(
        "{}{} {}{}",
        suffix.map(|s| s.as_str()).unwrap_or(""),
        labels.combined_label_string(),
        value,
        format_timestamp(timestamp)
    )
}

pub(crate) fn reject_reserved_label(label: &Label, reserved: &str, kind: MetricType) -> Result<()> {
    if label.name() == reserved {
        return Err(Error::invalid_argument(format!(
            "Label name '{}' is reserved for {} metrics",
            reserved, kind
        )));
    }
    Ok(())
}
