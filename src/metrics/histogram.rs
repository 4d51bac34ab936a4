use super::{fragment, reject_reserved_label, Count, Metric, MetricType, Sum};
use crate::error::{Error, Result};
use crate::model::{
    format_float, Label, LabelSet, MetricName, ProvidesSampleString, Sample, SampleValue, Suffix,
    Timestamp,
};

const BUCKET_LABEL: &str = "le";

#[derive(Copy, Clone, Debug, PartialEq)]
struct Bucket {
    upper_bound: f64,
    cumulative_count: u64,
}

/// Observations counted into cumulative buckets.
///
/// Buckets are kept sorted by upper bound. The `+Inf` bucket is implied by
/// `count` when it is not given explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    buckets: Vec<Bucket>,
    sum: Sum,
    count: Count,
    timestamp: Option<Timestamp>,
    labels: LabelSet,
}

impl Histogram {
    pub fn new(sum: f64, count: u64) -> Self {
        Self {
            buckets: Vec::new(),
            sum: Sum::new(sum),
            count: Count::new(count),
            timestamp: None,
            labels: LabelSet::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_bucket(mut self, upper_bound: f64, cumulative_count: u64) -> Result<Self> {
        self.add_bucket(upper_bound, cumulative_count)?;
        Ok(self)
    }

    pub fn add_bucket(&mut self, upper_bound: f64, cumulative_count: u64) -> Result<()> {
        if upper_bound.is_nan() {
            return Err(Error::invalid_argument("Bucket upper bound must not be NaN"));
        }

        let total = self.count.value();
        if cumulative_count > total {
            return Err(Error::invalid_argument(format!(
                "Bucket le={} counts {} observations, more than the total of {}",
                format_float(upper_bound),
                cumulative_count,
                total
            )));
        }
        if upper_bound == f64::INFINITY && cumulative_count != total {
            return Err(Error::invalid_argument(format!(
                "The +Inf bucket must count all {} observations",
                total
            )));
        }

        // Bounds are compared as rendered, since that is what tells series apart.
        let le = format_float(upper_bound);
        if self.buckets.iter().any(|b| format_float(b.upper_bound) == le) {
            return Err(Error::invalid_argument(format!("Duplicate bucket le={}", le)));
        }

        let pos = self
            .buckets
            .iter()
            .position(|b| b.upper_bound > upper_bound)
            .unwrap_or(self.buckets.len());

        if let Some(next) = self.buckets.get(pos) {
            if next.cumulative_count < cumulative_count {
                return Err(Error::invalid_argument(
                    "Bucket counts must not decrease as the upper bound grows",
                ));
            }
        }
        if pos > 0 && self.buckets[pos - 1].cumulative_count > cumulative_count {
            return Err(Error::invalid_argument(
                "Bucket counts must not decrease as the upper bound grows",
            ));
        }

        self.buckets.insert(
            pos,
            Bucket {
                upper_bound,
                cumulative_count,
            },
        );
        Ok(())
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
        let labels: Vec<Label> = labels.into_iter().collect();
        for label in &labels {
            reject_reserved_label(label, BUCKET_LABEL, MetricType::Histogram)?;
        }
        self.labels.add_all(labels)
    }

    #[inline]
    pub fn sum(&self) -> Sum {
        self.sum
    }

    #[inline]
    pub fn count(&self) -> Count {
        self.count
    }

    // Buckets in render order, closed by +Inf.
    fn rendered_buckets(&self) -> Vec<Bucket> {
        let mut buckets = self.buckets.clone();
        if buckets.last().map(|b| b.upper_bound) != Some(f64::INFINITY) {
            buckets.push(Bucket {
                upper_bound: f64::INFINITY,
                cumulative_count: self.count.value(),
            });
        }
        buckets
    }

    fn bucket_labels(&self, bucket: &Bucket) -> LabelSet {
        self.labels
            .with_extra(Label::reserved(BUCKET_LABEL, format_float(bucket.upper_bound)))
    }
}

impl ProvidesSampleString for Histogram {
    fn sample_string(&self) -> String {
        let mut lines: Vec<String> = self
            .rendered_buckets()
            .iter()
            .map(|b| {
                fragment(
                    Some(Suffix::Bucket),
                    &self.bucket_labels(b),
                    SampleValue::Integer(b.cumulative_count),
                    self.timestamp,
                )
            })
            .collect();
        lines.push(fragment(
            Some(Suffix::Sum),
            &self.labels,
            self.sum.value().into(),
            self.timestamp,
        ));
        lines.push(fragment(
            Some(Suffix::Count),
            &self.labels,
            self.count.value().into(),
            self.timestamp,
        ));
        lines.join("\n")
    }
}

impl Metric for Histogram {
    fn metric_type(&self) -> MetricType {
        MetricType::Histogram
    }

    fn labels(&self) -> &LabelSet {
        &self.labels
    }

    fn samples(&self, name: &MetricName) -> Vec<Sample> {
        let bucket_name = name.suffixed(Suffix::Bucket);
        let mut samples: Vec<Sample> = self
            .rendered_buckets()
            .iter()
            .map(|b| {
                Sample::new(
                    bucket_name.clone(),
                    self.bucket_labels(b),
                    b.cumulative_count,
                    self.timestamp,
                )
            })
            .collect();
        samples.push(self.sum.to_sample(name, &self.labels, self.timestamp));
        samples.push(self.count.to_sample(name, &self.labels, self.timestamp));
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_render_in_ascending_order() -> Result<()> {
        let histogram = Histogram::new(3.5, 5)
            .with_bucket(1.0, 4)?
            .with_bucket(0.5, 2)?
            .with_labels(vec![Label::new("path", "/api")?])?;
        let name = MetricName::new("request_seconds")?;

        let expected = [
            r#"request_seconds_bucket{path="/api",le="0.500000"} 2"#,
            r#"request_seconds_bucket{path="/api",le="1.000000"} 4"#,
            r#"request_seconds_bucket{path="/api",le="+Inf"} 5"#,
            r#"request_seconds_sum{path="/api"} 3.500000"#,
            r#"request_seconds_count{path="/api"} 5"#,
        ]
        .join("\n");
        assert_eq!(expected, histogram.render(&name));
        Ok(())
    }

    #[test]
    fn test_explicit_inf_bucket_is_not_repeated() -> Result<()> {
        let histogram = Histogram::new(1.0, 2)
            .with_bucket(f64::INFINITY, 2)?
            .with_timestamp(1620000000);

        let expected = [
            r#"_bucket{le="+Inf"} 2 1620000000"#,
            "_sum 1.000000 1620000000",
            "_count 2 1620000000",
        ]
        .join("\n");
        assert_eq!(expected, histogram.sample_string());
        Ok(())
    }

    #[test]
    fn test_invalid_buckets() -> Result<()> {
        assert!(Histogram::new(0.0, 3).with_bucket(f64::NAN, 1).is_err());
        assert!(Histogram::new(0.0, 3).with_bucket(1.0, 4).is_err());
        assert!(Histogram::new(0.0, 3).with_bucket(f64::INFINITY, 2).is_err());
        assert!(Histogram::new(0.0, 3).with_bucket(1.0, 1)?.with_bucket(1.0, 1).is_err());
        assert!(Histogram::new(0.0, 3).with_bucket(1.0, 2)?.with_bucket(2.0, 1).is_err());
        assert!(Histogram::new(0.0, 3).with_bucket(2.0, 1)?.with_bucket(1.0, 2).is_err());
        Ok(())
    }

    #[test]
    fn test_bounds_rendering_alike_are_duplicates() -> Result<()> {
        let histogram = Histogram::new(0.0, 2).with_bucket(1e-7, 1)?;
        assert!(histogram.clone().with_bucket(2e-7, 2).is_err());
        assert!(histogram.clone().with_bucket(0.0, 0).is_err());
        assert!(histogram.with_bucket(1e-6, 2).is_ok());
        Ok(())
    }

    #[test]
    fn test_le_label_is_reserved() -> Result<()> {
        let err = Histogram::new(0.0, 0)
            .with_labels(vec![Label::new("le", "1")?])
            .unwrap_err();
        assert!(err.is_invalid_argument());
        Ok(())
    }

    #[test]
    fn test_rejected_labels_leave_metric_unchanged() -> Result<()> {
        let mut metric = Histogram::new(0.0, 0).with_labels(vec![Label::new("job", "api")?])?;

        let reserved = metric.add_labels(vec![Label::new("zone", "eu")?, Label::new("le", "1")?]);
        assert!(reserved.is_err());
        let duplicate = metric.add_labels(vec![Label::new("zone", "eu")?, Label::new("job", "db")?]);
        assert!(duplicate.is_err());

        assert_eq!(1, metric.labels().len());
        Ok(())
    }
}
