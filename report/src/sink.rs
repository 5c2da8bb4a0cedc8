//! CSV file report sink

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use sort_bench_core::{ReportSink, SinkError, TrialRecord};

use crate::error::ReportError;

/// Report sink backed by a buffered file
///
/// The file is created (or truncated) and the header written on open. Each
/// append writes one whole line under the lock, so lines from concurrent
/// trials never interleave. Records stay buffered until `close`; if that
/// flush fails, buffered records are lost.
#[derive(Debug)]
pub struct CsvFileSink {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl CsvFileSink {
    /// Create the report file and write its header
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| ReportError::io(&path, e))?;
        let mut writer = BufWriter::new(file);

        let header = TrialRecord::header_line()?;
        writer
            .write_all(header.as_bytes())
            .map_err(|e| ReportError::io(&path, e))?;

        tracing::debug!(path = %path.display(), "Opened report file");

        Ok(Self {
            path,
            writer: Mutex::new(Some(writer)),
        })
    }

    /// Report file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<BufWriter<File>>>, SinkError> {
        self.writer.lock().map_err(|_| SinkError::Poisoned)
    }
}

impl ReportSink for CsvFileSink {
    fn append(&self, line: &str) -> Result<(), SinkError> {
        let mut guard = self.lock()?;
        let writer = guard.as_mut().ok_or(SinkError::Closed)?;
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn close(&self) -> Result<(), SinkError> {
        let mut guard = self.lock()?;
        let mut writer = guard.take().ok_or(SinkError::Closed)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;

        tracing::debug!(path = %self.path.display(), "Closed report file");
        Ok(())
    }
}
