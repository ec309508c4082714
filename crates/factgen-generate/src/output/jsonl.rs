use std::io::{self, Write};

use sha2::{Digest, Sha256};

use crate::errors::GenerationError;
use crate::model::Fact;

/// Bytes and digest of everything a [`FactWriter`] emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub facts: u64,
    pub bytes: u64,
    /// Hex SHA-256 of the written stream.
    pub sha256: String,
}

/// Write facts as JSON Lines, one compact object per line.
pub struct FactWriter<W: Write> {
    inner: DigestWriter<W>,
    facts: u64,
}

impl<W: Write> FactWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: DigestWriter::new(inner),
            facts: 0,
        }
    }

    pub fn write_fact(&mut self, fact: &Fact<'_>) -> Result<(), GenerationError> {
        serde_json::to_writer(&mut self.inner, fact)?;
        self.inner.write_all(b"\n")?;
        self.facts += 1;
        Ok(())
    }

    /// Flush the underlying writer and return it with the run summary.
    pub fn finish(mut self) -> Result<(W, WriteSummary), GenerationError> {
        self.inner.flush()?;
        let (inner, bytes, sha256) = self.inner.into_parts();
        Ok((
            inner,
            WriteSummary {
                facts: self.facts,
                bytes,
                sha256,
            },
        ))
    }
}

struct DigestWriter<W: Write> {
    inner: W,
    bytes: u64,
    hasher: Sha256,
}

impl<W: Write> DigestWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            bytes: 0,
            hasher: Sha256::new(),
        }
    }

    fn into_parts(self) -> (W, u64, String) {
        (self.inner, self.bytes, hex::encode(self.hasher.finalize()))
    }
}

impl<W: Write> Write for DigestWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.hasher.update(&buf[..size]);
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
