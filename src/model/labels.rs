use std::convert::TryFrom;
use std::fmt;

use super::name::is_valid_name;
use crate::error::{Error, Result};

pub type LabelName = String;

pub type LabelValue = String;

/// Escapes a label value for the text format.
///
/// Backslashes go first so the escapes added for quotes and newlines are not
/// escaped a second time.
pub fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Label {
    name: LabelName,
    value: LabelValue,
}

impl Label {
    pub fn new<N, V>(name: N, value: V) -> Result<Self>
    where
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("Label name must not be empty"));
        }
        if !is_valid_name(&name) {
            return Err(Error::invalid_argument(format!(
                "Invalid label name '{}'",
                name
            )));
        }

        Ok(Self {
            name,
            value: value.into(),
        })
    }

    // Labels the metric types attach themselves (`le`, `quantile`); the
    // name is a known-valid constant.
    pub(crate) fn reserved(name: &'static str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label_string(&self) -> String {
        format!("{}=\"{}\"", self.name, escape_label_value(&self.value))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.label_string())
    }
}

/// Ordered labels attached to a metric.
///
/// A set is an accumulator until its owner is rendered; after that it should
/// be treated as frozen. Names are unique within a set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self { labels: Vec::new() }
    }

    pub fn add(&mut self, label: Label) -> Result<()> {
        if self.contains(label.name()) {
            return Err(Error::invalid_argument(format!(
                "Label name '{}' is already used in this label set",
                label.name()
            )));
        }

        self.labels.push(label);
        Ok(())
    }

    /// Adds every label in order. On a duplicate the set is left as it was.
    pub fn add_all<I>(&mut self, labels: I) -> Result<()>
    where
        I: IntoIterator<Item = Label>,
    {
        let mut staged = self.clone();
        for label in labels {
            staged.add(label)?;
        }
        *self = staged;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&LabelValue> {
        self.labels.iter().find(|l| l.name == name).map(|l| &l.value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.labels.iter()
    }

    pub fn combined_label_string(&self) -> String {
        if self.labels.is_empty() {
            return String::new();
        }

        let parts: Vec<String> = self.labels.iter().map(Label::label_string).collect();
        format!("{{{}}}", parts.join(","))
    }

    // Copy of this set with one more label appended. Callers guarantee the
    // name is not taken (the metric types reserve `le` and `quantile`).
    pub(crate) fn with_extra(&self, label: Label) -> Self {
        let mut labels = self.labels.clone();
        labels.push(label);
        Self { labels }
    }
}

impl TryFrom<Vec<Label>> for LabelSet {
    type Error = Error;

    fn try_from(labels: Vec<Label>) -> Result<Self> {
        let mut set = LabelSet::new();
        set.add_all(labels)?;
        Ok(set)
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.combined_label_string())
    }
}
