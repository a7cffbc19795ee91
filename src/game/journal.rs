//! Append-only audit trail for a single game.
//!
//! The engine writes board snapshots, score summaries and one line per
//! placement attempt here. Nothing in the game logic reads it back.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::error::GameError;

pub trait GameLog: Send {
    fn append_line(&mut self, line: &str) -> io::Result<()>;
}

/// Writes the log to a file, truncating anything already there.
pub struct FileLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileLog {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| GameError::LogUnavailable {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GameLog for FileLog {
    fn append_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}

/// Keeps log lines in memory. Clones share the same buffer, so a caller can
/// hand one clone to the engine and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl GameLog for MemoryLog {
    fn append_line(&mut self, line: &str) -> io::Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| io::Error::other("memory log poisoned"))?;
        lines.push(line.to_string());
        Ok(())
    }
}
