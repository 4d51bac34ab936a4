mod decoder;
mod reader;

pub use decoder::{Decoder, JsonDecoder, MetricDefinition};
pub use reader::LineReader;
