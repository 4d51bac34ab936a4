use crate::model::{LabelSet, MetricName, ProvidesSampleString, Sample, Suffix, Timestamp};

/// Running total of all observations, rendered as `_sum`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sum {
    sum: f64,
}

impl Sum {
    pub fn new(sum: f64) -> Self {
        Self { sum }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.sum
    }

    pub fn to_sample(&self, name: &MetricName, labels: &LabelSet, timestamp: Option<Timestamp>) -> Sample {
        Sample::new(name.suffixed(Suffix::Sum), labels.clone(), self.sum, timestamp)
    }
}

impl ProvidesSampleString for Sum {
    fn sample_string(&self) -> String {
        super::fragment(Some(Suffix::Sum), &LabelSet::new(), self.sum.into(), None)
    }
}

/// Number of observations, rendered as `_count` without a decimal point.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Count {
    count: u64,
}

impl Count {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.count
    }

    pub fn to_sample(&self, name: &MetricName, labels: &LabelSet, timestamp: Option<Timestamp>) -> Sample {
        Sample::new(name.suffixed(Suffix::Count), labels.clone(), self.count, timestamp)
    }
}

impl ProvidesSampleString for Count {
    fn sample_string(&self) -> String {
        super::fragment(Some(Suffix::Count), &LabelSet::new(), self.count.into(), None)
    }
}
