use std::collections::HashSet;

use crate::error::{Error, ErrorKind, Result};
use crate::input::Decoder;
use crate::metrics::MetricFamily;
use crate::output::{Encoder, Writer};

// Reader  == stdin                 ->  Iterator<Result<Vec<u8>>>
// Decoder == JSON definition line  ->  MetricFamily
// Encoder == MetricFamily          ->  exposition lines
// Writer  == exposition lines      ->  stdout

pub struct Runner {
    reader: Box<dyn Iterator<Item = Result<Vec<u8>>>>,
    decoder: Box<dyn Decoder>,
    consumer: Consumer,
}

impl Runner {
    pub fn new(
        reader: Box<dyn Iterator<Item = Result<Vec<u8>>>>,
        decoder: Box<dyn Decoder>,
        encoder: Box<dyn Encoder>,
        writer: Box<dyn Writer>,
    ) -> Self {
        Self {
            reader,
            decoder,
            consumer: Consumer::new(writer, encoder),
        }
    }

    /// Consecutive definitions sharing a name form one family. A name that
    /// shows up again after another family has started is rejected.
    pub fn run(&mut self) -> Result<()> {
        let mut families = 0;
        let mut seen = HashSet::new();
        let mut current: Option<MetricFamily> = None;

        for (lineno, line) in (&mut self.reader).enumerate() {
            let line = line?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let family = self
                .decoder
                .decode(&line)
                .and_then(|family| {
                    if let Some(open) = current
                        .as_mut()
                        .filter(|open| open.name() == family.name())
                    {
                        open.merge(family)?;
                        return Ok(None);
                    }
                    if !seen.insert(family.name().clone()) {
                        return Err(Error::invalid_argument(format!(
                            "Metric family '{}' must be defined on consecutive lines",
                            family.name()
                        )));
                    }
                    Ok(Some(family))
                })
                .map_err(|e| {
                    tracing::warn!(line = lineno + 1, error = %e, "invalid metric definition");
                    e
                })?;

            if let Some(family) = family {
                if let Some(done) = current.replace(family) {
                    self.consumer.write(&done)?;
                    families += 1;
                }
            }
        }

        if let Some(done) = current {
            self.consumer.write(&done)?;
            families += 1;
        }

        self.consumer.finish()?;
        tracing::debug!(families, "exposition written");
        Ok(())
    }
}

struct Consumer {
    writer: Box<dyn Writer>,
    encoder: Box<dyn Encoder>,
}

impl Consumer {
    fn new(writer: Box<dyn Writer>, encoder: Box<dyn Encoder>) -> Self {
        Self { writer, encoder }
    }

    fn write(&mut self, family: &MetricFamily) -> Result<()> {
        let buf = self.encoder.encode(family)?;
        self.emit(&buf)
    }

    fn finish(&mut self) -> Result<()> {
        match self.encoder.finish() {
            Some(buf) => self.emit(&buf),
            None => Ok(()),
        }
    }

    fn emit(&mut self, buf: &[u8]) -> Result<()> {
        self.writer
            .write(buf)
            .map_err(|e| Error::with_kind(ErrorKind::Output, "writer failed", e))
    }
}
