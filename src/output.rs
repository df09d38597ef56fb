use std::{fs::File, io::Write, path::Path};

use crate::{BacklinkError, EntityId};

/// Placeholder written for any field that could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

const HEADER: [&str; 3] = ["Name", "QID", "Displayed Items Count"];

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Resolved { id: EntityId, count: u64 },
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    name: String,
    outcome: RowOutcome,
}

impl OutputRow {
    pub fn resolved<S: Into<String>>(name: S, id: EntityId, count: u64) -> Self {
        Self {
            name: name.into(),
            outcome: RowOutcome::Resolved { id, count },
        }
    }

    pub fn unavailable<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            outcome: RowOutcome::Unavailable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn outcome(&self) -> &RowOutcome {
        &self.outcome
    }

    pub const fn is_resolved(&self) -> bool {
        matches!(self.outcome, RowOutcome::Resolved { .. })
    }

    fn to_record(&self) -> [String; 3] {
        match &self.outcome {
            RowOutcome::Resolved { id, count } => {
                [self.name.to_owned(), id.to_string(), count.to_string()]
            }
            RowOutcome::Unavailable => [
                self.name.to_owned(),
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
            ],
        }
    }
}

/// Appends result rows to a CSV sink, flushing after every row.
#[derive(Debug)]
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ResultWriter<File> {
    /// Creates (or truncates) the file at `path` and writes the header.
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, BacklinkError> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> ResultWriter<W> {
    /// Wraps `inner` and writes the header.
    /// # Errors
    /// Returns an error if the header cannot be written.
    pub fn new(inner: W) -> Result<Self, BacklinkError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Writes one row and flushes it to the sink.
    /// # Errors
    /// Returns an error if the row cannot be written.
    pub fn write_row(&mut self, row: &OutputRow) -> Result<(), BacklinkError> {
        self.writer.write_record(row.to_record())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    /// # Errors
    /// Returns an error if the final flush fails.
    pub fn into_inner(self) -> Result<W, BacklinkError> {
        self.writer
            .into_inner()
            .map_err(|e| BacklinkError::Io(e.into_error()))
    }
}
