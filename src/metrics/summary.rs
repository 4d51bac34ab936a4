use super::{fragment, reject_reserved_label, Count, Metric, MetricType, Sum};
use crate::error::{Error, Result};
use crate::model::{
    format_float, Label, LabelSet, MetricName, ProvidesSampleString, Sample, SampleValue, Suffix,
    Timestamp,
};

const QUANTILE_LABEL: &str = "quantile";

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    quantiles: Vec<(f64, f64)>,
    sum: Sum,
    count: Count,
    timestamp: Option<Timestamp>,
    labels: LabelSet,
}

impl Summary {
    pub fn new(sum: f64, count: u64) -> Self {
        Self {
            quantiles: Vec::new(),
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

    pub fn with_quantile(mut self, quantile: f64, value: f64) -> Result<Self> {
        self.add_quantile(quantile, value)?;
        Ok(self)
    }

    pub fn add_quantile(&mut self, quantile: f64, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&quantile) {
            return Err(Error::invalid_argument(format!(
                "Quantile {} is outside of [0, 1]",
                format_float(quantile)
            )));
        }

        // Quantiles are compared as rendered, since that is what tells series apart.
        let rendered = format_float(quantile);
        if self.quantiles.iter().any(|(q, _)| format_float(*q) == rendered) {
            return Err(Error::invalid_argument(format!(
                "Duplicate quantile {}",
                rendered
            )));
        }

        let pos = self
            .quantiles
            .iter()
            .position(|(q, _)| *q > quantile)
            .unwrap_or(self.quantiles.len());

        self.quantiles.insert(pos, (quantile, value));
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
            reject_reserved_label(label, QUANTILE_LABEL, MetricType::Summary)?;
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

    fn quantile_labels(&self, quantile: f64) -> LabelSet {
        self.labels
            .with_extra(Label::reserved(QUANTILE_LABEL, format_float(quantile)))
    }
}

impl ProvidesSampleString for Summary {
    fn sample_string(&self) -> String {
        let mut lines: Vec<String> = self
            .quantiles
            .iter()
            .map(|(q, v)| fragment(None, &self.quantile_labels(*q), SampleValue::Float(*v), self.timestamp))
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

impl Metric for Summary {
    fn metric_type(&self) -> MetricType {
        MetricType::Summary
    }

    fn labels(&self) -> &LabelSet {
        &self.labels
    }

    fn samples(&self, name: &MetricName) -> Vec<Sample> {
        let base = name.unsuffixed();
        let mut samples: Vec<Sample> = self
            .quantiles
            .iter()
            .map(|(q, v)| Sample::new(base.clone(), self.quantile_labels(*q), *v, self.timestamp))
            .collect();
        samples.push(self.sum.to_sample(name, &self.labels, self.timestamp));
        samples.push(self.count.to_sample(name, &self.labels, self.timestamp));
        samples
    }
}
