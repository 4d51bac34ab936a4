use std::fmt;

use super::labels::LabelSet;
use super::name::MetricName;
use super::timestamp::Timestamp;

/// Digits after the decimal point for every finite float in the output.
pub const FLOAT_PRECISION: usize = 6;

/// Renders a float the way every sample value and threshold label is written.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else {
        format!("{:.*}", FLOAT_PRECISION, value)
    }
}

pub(crate) fn format_timestamp(timestamp: Option<Timestamp>) -> String {
    match timestamp {
        Some(ts) => format!(" {}", ts),
        None => String::new(),
    }
}

/// Anything that renders to one or more exposition lines.
///
/// Metric builders render a fragment that starts at the name suffix (the
/// base name is supplied by the owning family); a frozen [`Sample`] renders
/// its whole line.
pub trait ProvidesSampleString {
    fn sample_string(&self) -> String;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SampleValue {
    Float(f64),
    Integer(u64),
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SampleValue::Float(v) => f.write_str(&format_float(*v)),
            SampleValue::Integer(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for SampleValue {
    fn from(v: f64) -> Self {
        SampleValue::Float(v)
    }
}

impl From<u64> for SampleValue {
    fn from(v: u64) -> Self {
        SampleValue::Integer(v)
    }
}

/// One frozen exposition line.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    name: MetricName,
    labels: LabelSet,
    value: SampleValue,
    timestamp: Option<Timestamp>,
}

impl Sample {
    pub fn new<V: Into<SampleValue>>(
        name: MetricName,
        labels: LabelSet,
        value: V,
        timestamp: Option<Timestamp>,
    ) -> Self {
        Self {
            name,
            labels,
            value: value.into(),
            timestamp,
        }
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    #[inline]
    pub fn value(&self) -> SampleValue {
        self.value
    }

    #[inline]
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{} {}{}",
            self.name,
            self.labels.combined_label_string(),
            self.value,
            format_timestamp(self.timestamp)
        )
    }
}

impl ProvidesSampleString for Sample {
    fn sample_string(&self) -> String {
        self.to_string()
    }
}
