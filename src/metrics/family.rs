use super::{Metric, MetricType};
use crate::error::{Error, Result};
use crate::model::{escape_label_value, LabelSet, MetricName};

pub const EOF_MARKER: &str = "# EOF";

/// All metrics sharing one name and type, with their descriptor lines.
#[derive(Debug)]
pub struct MetricFamily {
    name: MetricName,
    metric_type: MetricType,
    help: Option<String>,
    metrics: Vec<Box<dyn Metric>>,
}

impl MetricFamily {
    pub fn new(name: MetricName, metric_type: MetricType) -> Result<Self> {
        if let Some(suffix) = name.suffix() {
            return Err(Error::invalid_argument(format!(
                "Family name '{}' must not carry the sample suffix '{}'",
                name, suffix
            )));
        }
        if let Some(family) = name.family() {
            if family != metric_type {
                return Err(Error::invalid_argument(format!(
                    "Metric name '{}' was declared as {}, not {}",
                    name, family, metric_type
                )));
            }
        }

        Ok(Self {
            name,
            metric_type,
            help: None,
            metrics: Vec::new(),
        })
    }

    pub fn with_help<H: Into<String>>(mut self, help: H) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_metric<M: Metric + 'static>(mut self, metric: M) -> Result<Self> {
        self.add_metric(metric)?;
        Ok(self)
    }

    pub fn add_metric<M: Metric + 'static>(&mut self, metric: M) -> Result<()> {
        self.check_metric(&metric)?;
        self.metrics.push(Box::new(metric));
        Ok(())
    }

    /// Moves every metric of `other` into this family.
    ///
    /// Both families must share name and type, and a HELP text set on both
    /// must agree. Nothing is moved when any check fails.
    pub fn merge(&mut self, other: MetricFamily) -> Result<()> {
        if other.name != self.name || other.metric_type != self.metric_type {
            return Err(Error::invalid_argument(format!(
                "Cannot merge {} family '{}' into {} family '{}'",
                other.metric_type, other.name, self.metric_type, self.name
            )));
        }
        if let (Some(ours), Some(theirs)) = (&self.help, &other.help) {
            if ours != theirs {
                return Err(Error::invalid_argument(format!(
                    "Family '{}' has conflicting HELP texts",
                    self.name
                )));
            }
        }
        for metric in &other.metrics {
            self.check_metric(metric.as_ref())?;
        }

        if self.help.is_none() {
            self.help = other.help;
        }
        self.metrics.extend(other.metrics);
        Ok(())
    }

    fn check_metric(&self, metric: &dyn Metric) -> Result<()> {
        if metric.metric_type() != self.metric_type {
            return Err(Error::invalid_argument(format!(
                "Cannot add a {} to {} family '{}'",
                metric.metric_type(),
                self.metric_type,
                self.name
            )));
        }
        if self
            .metrics
            .iter()
            .any(|m| same_series(m.labels(), metric.labels()))
        {
            return Err(Error::invalid_argument(format!(
                "Family '{}' already has a metric with labels {}",
                self.name,
                metric.labels()
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    pub fn lines(&self) -> Vec<String> {
        tracing::trace!(name = %self.name, metrics = self.metrics.len(), "rendering metric family");

        let mut lines = Vec::new();
        if let Some(help) = &self.help {
            lines.push(format!("# HELP {} {}", self.name, escape_label_value(help)));
        }
        lines.push(format!("# TYPE {} {}", self.name, self.metric_type));
        for metric in &self.metrics {
            lines.extend(metric.samples(&self.name).iter().map(|s| s.to_string()));
        }
        lines
    }

    /// Descriptor and sample lines, each terminated by a newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

// Label order does not distinguish series.
fn same_series(a: &LabelSet, b: &LabelSet) -> bool {
    a.len() == b.len() && a.iter().all(|l| b.get(l.name()).map(String::as_str) == Some(l.value()))
}

/// A complete exposition: every family followed by the `# EOF` marker.
pub fn exposition(families: &[MetricFamily]) -> String {
    let mut out: String = families.iter().map(MetricFamily::render).collect();
    out.push_str(EOF_MARKER);
    out.push('\n');
    out
}
