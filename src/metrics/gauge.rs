use super::{fragment, Metric, MetricType};
use crate::error::Result;
use crate::model::{Label, LabelSet, MetricName, ProvidesSampleString, Sample, SampleValue, Timestamp};

/// A value that can go up and down. Any float is accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct Gauge {
    value: f64,
    timestamp: Option<Timestamp>,
    labels: LabelSet,
}

impl Gauge {
    pub fn from_value(value: f64) -> Self {
        Self {
            value,
            timestamp: None,
            labels: LabelSet::new(),
        }
    }

    pub fn from_value_and_timestamp(value: f64, timestamp: Timestamp) -> Self {
        Self {
            value,
            timestamp: Some(timestamp),
            labels: LabelSet::new(),
        }
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
}

impl ProvidesSampleString for Gauge {
    fn sample_string(&self) -> String {
        fragment(None, &self.labels, SampleValue::Float(self.value), self.timestamp)
    }
}

impl Metric for Gauge {
    fn metric_type(&self) -> MetricType {
        MetricType::Gauge
    }

    fn labels(&self) -> &LabelSet {
        &self.labels
    }

    fn samples(&self, name: &MetricName) -> Vec<Sample> {
        vec![Sample::new(
            name.unsuffixed(),
            self.labels.clone(),
            self.value,
            self.timestamp,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_accepts_any_value() {
        #[rustfmt::skip]
        let tests = [
            (-12.5,             " -12.500000"),
            (0.0,               " 0.000000"),
            (f64::NEG_INFINITY, " -Inf"),
            (f64::NAN,          " NaN"),
        ];

        for (value, expected) in &tests {
            assert_eq!(*expected, Gauge::from_value(*value).sample_string());
        }
    }

    #[test]
    fn test_gauge_has_no_suffix() -> Result<()> {
        let gauge = Gauge::from_value_and_timestamp(21.5, 1620000000)
            .with_labels(vec![Label::new("room", "kitchen")?])?;
        let name = MetricName::new("temperature_celsius")?;

        assert_eq!(
            r#"temperature_celsius{room="kitchen"} 21.500000 1620000000"#,
            gauge.render(&name)
        );
        Ok(())
    }
}
