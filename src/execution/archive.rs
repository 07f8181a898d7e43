use crate::prelude::*;

use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

const COMPRESSION_LEVEL: i64 = 6;

/// In-memory zip assembly for one export job. Entries keep the original file
/// names; the whole archive is serialized by `finish`.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    num_entries: usize,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(COMPRESSION_LEVEL)),
            num_entries: 0,
        }
    }

    pub fn add_file(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.writer
            .start_file(name, self.options)
            .with_context(|| format!("failed to start archive entry {name}"))?;
        self.writer
            .write_all(bytes)
            .with_context(|| format!("failed to write archive entry {name}"))?;
        self.num_entries += 1;
        Ok(())
    }

    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.writer.finish().context("failed to finalize archive")?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
