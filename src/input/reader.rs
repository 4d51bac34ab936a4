use std::io::BufRead;

use crate::error::{Error, ErrorKind, Result};

pub struct LineReader<R> {
    inner: R,
    delim: u8,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            delim: b'\n',
        }
    }
}

impl<R: BufRead> std::iter::Iterator for LineReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.inner.read_until(self.delim, &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&self.delim) {
                    buf.pop();
                }
                Some(Ok(buf))
            }
            Err(e) => Some(Err(Error::with_kind(ErrorKind::Input, "reader failed", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_without_delimiter() -> Result<()> {
        let reader = LineReader::new(&b"first\nsecond\nlast"[..]);
        let lines = reader.collect::<Result<Vec<_>>>()?;
        assert_eq!(vec![b"first".to_vec(), b"second".to_vec(), b"last".to_vec()], lines);
        Ok(())
    }
}
