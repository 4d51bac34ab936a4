use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::metrics::MetricType;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*$").unwrap();
}

/// Checks `name` against the OpenMetrics identifier grammar.
pub(crate) fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Reserved sample name suffixes. Each token includes its leading underscore.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Suffix {
    Total,
    Created,
    Count,
    Sum,
    Bucket,
}

impl Suffix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suffix::Total => "_total",
            Suffix::Created => "_created",
            Suffix::Count => "_count",
            Suffix::Sum => "_sum",
            Suffix::Bucket => "_bucket",
        }
    }
}

impl TryFrom<&str> for Suffix {
    type Error = Error;

    fn try_from(suffix: &str) -> Result<Self> {
        match suffix {
            "_total" => Ok(Suffix::Total),
            "_created" => Ok(Suffix::Created),
            "_count" => Ok(Suffix::Count),
            "_sum" => Ok(Suffix::Sum),
            "_bucket" => Ok(Suffix::Bucket),
            _ => Err(Error::invalid_argument(format!(
                "Unknown metric name suffix '{}'",
                suffix
            ))),
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated metric name, optionally carrying one reserved suffix.
///
/// Names built with [`MetricName::for_type`] remember their metric family and
/// only accept the suffixes that family defines.
#[derive(Clone, Debug)]
pub struct MetricName {
    base: String,
    suffix: Option<Suffix>,
    family: Option<MetricType>,
}

impl MetricName {
    pub fn new<N: Into<String>>(raw: N) -> Result<Self> {
        let base = raw.into();
        if !is_valid_name(&base) {
            return Err(Error::invalid_argument(format!(
                "Invalid metric name '{}'",
                base
            )));
        }

        Ok(Self {
            base,
            suffix: None,
            family: None,
        })
    }

    pub fn for_type<N: Into<String>>(raw: N, family: MetricType) -> Result<Self> {
        let mut name = Self::new(raw)?;
        name.family = Some(family);
        Ok(name)
    }

    #[inline]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[inline]
    pub fn suffix(&self) -> Option<Suffix> {
        self.suffix
    }

    #[inline]
    pub fn family(&self) -> Option<MetricType> {
        self.family
    }

    pub fn with_suffix(&self, suffix: &str) -> Result<Self> {
        let suffix = Suffix::try_from(suffix)?;

        if let Some(existing) = self.suffix {
            return Err(Error::invalid_argument(format!(
                "Metric name '{}' already ends with '{}'",
                self, existing
            )));
        }

        if let Some(family) = self.family {
            if !family.suffixes().contains(&suffix) {
                return Err(Error::invalid_argument(format!(
                    "Suffix '{}' is not allowed for {} metric '{}'",
                    suffix, family, self.base
                )));
            }
        }

        Ok(self.suffixed(suffix))
    }

    // Used by the metric types while rendering; the family is known to allow
    // the suffix, and any suffix already present is replaced.
    pub(crate) fn suffixed(&self, suffix: Suffix) -> Self {
        Self {
            base: self.base.clone(),
            suffix: Some(suffix),
            family: self.family,
        }
    }

    pub(crate) fn unsuffixed(&self) -> Self {
        Self {
            base: self.base.clone(),
            suffix: None,
            family: self.family,
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.suffix {
            Some(suffix) => write!(f, "{}{}", self.base, suffix),
            None => f.write_str(&self.base),
        }
    }
}

impl PartialEq for MetricName {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.suffix == other.suffix
    }
}

impl Eq for MetricName {}

impl Hash for MetricName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.suffix.hash(state);
    }
}

impl TryFrom<&str> for MetricName {
    type Error = Error;

    fn try_from(raw: &str) -> Result<Self> {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() -> Result<()> {
        let tests = ["http_requests", "_private", ":colon:name", "a1", "Z", "job:rate5m"];

        for input in &tests {
            let name = MetricName::new(*input)?;
            assert_eq!(*input, name.to_string(), "while parsing {}", input);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_names() {
        let tests = ["", "1abc", "http-requests", "with space", "dot.name", "ünïcode"];

        for input in &tests {
            let err = MetricName::new(*input).expect_err(input);
            assert!(err.is_invalid_argument(), "while parsing {}", input);
        }
    }

    #[test]
    fn test_with_suffix() -> Result<()> {
        let name = MetricName::new("http_requests")?;
        let total = name.with_suffix("_total")?;

        assert_eq!("http_requests_total", total.to_string());
        assert_eq!("http_requests", name.to_string());
        assert_eq!(Some(Suffix::Total), total.suffix());
        Ok(())
    }

    #[test]
    fn test_with_suffix_rejects_unknown_and_repeated() -> Result<()> {
        let name = MetricName::new("http_requests")?;
        assert!(name.with_suffix("total").is_err());
        assert!(name.with_suffix("_seconds").is_err());
        assert!(name.with_suffix("_total")?.with_suffix("_total").is_err());
        Ok(())
    }

    #[test]
    fn test_with_suffix_respects_family() -> Result<()> {
        let counter = MetricName::for_type("jobs", MetricType::Counter)?;
        assert!(counter.with_suffix("_total").is_ok());
        assert!(counter.with_suffix("_created").is_ok());
        assert!(counter.with_suffix("_bucket").is_err());

        let gauge = MetricName::for_type("temperature", MetricType::Gauge)?;
        assert!(gauge.with_suffix("_total").is_err());

        let histogram = MetricName::for_type("latency", MetricType::Histogram)?;
        assert!(histogram.with_suffix("_bucket").is_ok());
        assert!(histogram.with_suffix("_total").is_err());
        Ok(())
    }

    #[test]
    fn test_structural_equality() -> Result<()> {
        let plain = MetricName::new("jobs")?;
        let typed = MetricName::for_type("jobs", MetricType::Counter)?;

        assert_eq!(plain, typed);
        assert_ne!(plain, plain.with_suffix("_total")?);
        assert_eq!(plain.with_suffix("_total")?, typed.with_suffix("_total")?);
        Ok(())
    }
}
