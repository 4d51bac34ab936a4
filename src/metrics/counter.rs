use super::{fragment, Metric, MetricType};
use crate::error::{Error, Result};
use crate::model::{
    Label, LabelSet, MetricName, ProvidesSampleString, Sample, SampleValue, Suffix, Timestamp,
};

/// A monotonically increasing total, rendered with the `_total` suffix.
///
/// Only non-negativity is checked here. Successive counters reported for the
/// same series must never go down, but a single instance has no history to
/// compare against, so keeping values monotonic is up to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Counter {
    value: f64,
    timestamp: Option<Timestamp>,
    labels: LabelSet,
}

impl Counter {
    fn new(value: f64, timestamp: Option<Timestamp>) -> Result<Self> {
        // NaN passes: it is a legal sample value and not below zero.
        if value < 0.0 {
            return Err(Error::invalid_argument(
                "Counters must start at 0 and can only go up.",
            ));
        }

        Ok(Self {
            value,
            timestamp,
            labels: LabelSet::new(),
        })
    }

    pub fn from_value(value: f64) -> Result<Self> {
        Self::new(value, None)
    }

    pub fn from_value_and_timestamp(value: f64, timestamp: Timestamp) -> Result<Self> {
        Self::new(value, Some(timestamp))
    }

    pub fn with_labels<I>(mut self, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = Label>,
    {
        self.add_labels(labels)?;
        Ok(self)
    }

    pub fn with_label_set(mut self, labels: LabelSet) -> Result<Self> {
        self.add_labels(labels.iter().cloned())?;
        Ok(self)
    }

    pub fn add_labels<I>(&mut self, labels: I) -> Result<()>
    where
        I: IntoIterator<Item = Label>,
    {
        self.labels.add_all(labels)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }
}

impl ProvidesSampleString for Counter {
    fn sample_string(&self) -> String {
        fragment(
            Some(Suffix::Total),
            &self.labels,
            SampleValue::Float(self.value),
            self.timestamp,
        )
    }
}

impl Metric for Counter {
    fn metric_type(&self) -> MetricType {
        MetricType::Counter
    }

    fn labels(&self) -> &LabelSet {
        &self.labels
    }

    fn samples(&self, name: &MetricName) -> Vec<Sample> {
        vec![Sample::new(
            name.suffixed(Suffix::Total),
            self.labels.clone(),
            self.value,
            self.timestamp,
        )]
    }
}
