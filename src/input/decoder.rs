use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};
use crate::metrics::{Counter, Gauge, Histogram, MetricFamily, MetricType, Summary};
use crate::model::{Label, MetricName, Timestamp};

pub trait Decoder {
    fn decode(&self, buf: &[u8]) -> Result<MetricFamily>;
}

// {"name": "http_requests", "type": "counter", "help": "Requests served.",
//  "labels": [["method", "GET"], ["code", "200"]], "value": 1027, "timestamp": 1620000000}
#[derive(Debug, Deserialize)]
pub struct MetricDefinition {
    pub name: String,
    pub help: Option<String>,
    #[serde(default)]
    pub labels: Vec<(String, String)>,
    pub timestamp: Option<Timestamp>,
    #[serde(flatten)]
    pub kind: KindDefinition,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KindDefinition {
    Counter {
        value: f64,
    },
    Gauge {
        value: f64,
    },
    Histogram {
        sum: f64,
        count: u64,
        #[serde(default)]
        buckets: Vec<(f64, u64)>,
    },
    Summary {
        sum: f64,
        count: u64,
        #[serde(default)]
        quantiles: Vec<(f64, f64)>,
    },
}

impl KindDefinition {
    fn metric_type(&self) -> MetricType {
        match self {
            KindDefinition::Counter { .. } => MetricType::Counter,
            KindDefinition::Gauge { .. } => MetricType::Gauge,
            KindDefinition::Histogram { .. } => MetricType::Histogram,
            KindDefinition::Summary { .. } => MetricType::Summary,
        }
    }
}

impl MetricDefinition {
    /// Builds a one-metric family; `default_timestamp` applies when the
    /// definition carries none.
    pub fn into_family(self, default_timestamp: Option<Timestamp>) -> Result<MetricFamily> {
        let metric_type = self.kind.metric_type();
        let name = MetricName::for_type(self.name, metric_type)?;
        let labels = self
            .labels
            .into_iter()
            .map(|(n, v)| Label::new(n, v))
            .collect::<Result<Vec<_>>>()?;
        let timestamp = self.timestamp.or(default_timestamp);

        let mut family = MetricFamily::new(name, metric_type)?;
        if let Some(help) = self.help {
            family = family.with_help(help);
        }

        match self.kind {
            KindDefinition::Counter { value } => {
                let counter = match timestamp {
                    Some(ts) => Counter::from_value_and_timestamp(value, ts)?,
                    None => Counter::from_value(value)?,
                };
                family.add_metric(counter.with_labels(labels)?)?;
            }
            KindDefinition::Gauge { value } => {
                let gauge = match timestamp {
                    Some(ts) => Gauge::from_value_and_timestamp(value, ts),
                    None => Gauge::from_value(value),
                };
                family.add_metric(gauge.with_labels(labels)?)?;
            }
            KindDefinition::Histogram {
                sum,
                count,
                buckets,
            } => {
                let mut histogram = Histogram::new(sum, count).with_labels(labels)?;
                for (upper_bound, cumulative_count) in buckets {
                    histogram.add_bucket(upper_bound, cumulative_count)?;
                }
                if let Some(ts) = timestamp {
                    histogram = histogram.with_timestamp(ts);
                }
                family.add_metric(histogram)?;
            }
            KindDefinition::Summary {
                sum,
                count,
                quantiles,
            } => {
                let mut summary = Summary::new(sum, count).with_labels(labels)?;
                for (quantile, value) in quantiles {
                    summary.add_quantile(quantile, value)?;
                }
                if let Some(ts) = timestamp {
                    summary = summary.with_timestamp(ts);
                }
                family.add_metric(summary)?;
            }
        }

        Ok(family)
    }
}

pub struct JsonDecoder {
    default_timestamp: Option<Timestamp>,
}

impl JsonDecoder {
    pub fn new(default_timestamp: Option<Timestamp>) -> Self {
        Self { default_timestamp }
    }
}

impl Decoder for JsonDecoder {
    fn decode(&self, buf: &[u8]) -> Result<MetricFamily> {
        let definition: MetricDefinition = serde_json::from_slice(buf)
            .map_err(|e| Error::with_kind(ErrorKind::Input, "JSON decoding failed", e))?;
        definition.into_family(self.default_timestamp)
    }
}
