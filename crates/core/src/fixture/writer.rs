//! Task file serialization.
//!
//! Serialization is a single linear pass over a built `Fixture`; it performs no
//! validation and cannot fail except through the underlying writer. `save`
//! writes to a temporary file in the destination directory and renames it into
//! place, so a failed run never leaves a partial task file behind.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use super::Fixture;
use crate::common::constants::{
    DATA_SEGMENT_BYTES, REGISTER_BANK_BYTES, SEGMENT_HEADER_BYTES, WORD_BYTES,
};
use crate::common::FixtureError;
use crate::fixture::segment::DataSegment;

/// Writes one little-endian word.
fn put<W: Write>(out: &mut W, word: u32) -> io::Result<()> {
    out.write_all(&word.to_le_bytes())
}

impl Fixture {
    /// Exact size of the serialized task file: `128 + 8 + 4n + 12m`.
    pub const fn encoded_len(&self) -> usize {
        REGISTER_BANK_BYTES
            + SEGMENT_HEADER_BYTES
            + self.code.words.len() * WORD_BYTES
            + self.data.len() * DATA_SEGMENT_BYTES
    }

    /// Every word of the task file, in file order.
    fn words(&self) -> impl Iterator<Item = u32> + '_ {
        // Byte length fits: build() proved base + len stays within u32.
        let header = [self.code.base, self.code.byte_len() as u32];
        std::iter::once(self.pc)
            .chain(self.registers.serialized().iter().copied())
            .chain(header)
            .chain(self.code.words.iter().copied())
            .chain(
                self.data
                    .iter()
                    .flat_map(|seg| [seg.addr, DataSegment::LEN, seg.value]),
            )
    }

    /// Serializes the fixture into `out`.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out` unmodified.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for word in self.words() {
            put(out, word)?;
        }
        Ok(())
    }

    /// Serializes the fixture into a fresh buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.extend(self.words().flat_map(u32::to_le_bytes));
        buf
    }

    /// Writes the task file to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// `FixtureError::Io` when the temporary file cannot be created, written,
    /// synced or renamed over `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FixtureError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut out = BufWriter::new(tmp.as_file());
            self.write_to(&mut out)?;
            out.flush()?;
        }
        tmp.as_file().sync_all()?;
        let _file = tmp.persist(path).map_err(|e| e.error)?;

        info!(
            path = %path.display(),
            bytes = self.encoded_len(),
            instructions = self.code.instruction_count(),
            data = self.data.len(),
            "task file written"
        );
        Ok(())
    }
}
