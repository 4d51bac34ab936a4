mod encoder;
mod writer;

pub use encoder::{Encoder, OpenMetricsEncoder};
pub use writer::{LineWriter, Writer};
