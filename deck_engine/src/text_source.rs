//! Clipboard-like text sources a deck string can be read from

use crate::error::Result;
use std::io::Read;
use std::path::PathBuf;

/// Anything that can hand over one block of text
pub trait TextSource {
    fn read_text(&self) -> Result<String>;
}

/// Text held in memory, e.g. already taken from a clipboard by the caller
#[derive(Debug, Clone)]
pub struct StaticText(String);

impl StaticText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl TextSource for StaticText {
    fn read_text(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Text read from a file on every call
#[derive(Debug, Clone)]
pub struct FileText {
    path: PathBuf,
}

impl FileText {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for FileText {
    fn read_text(&self) -> Result<String> {
        log::debug!("Reading deck text from {}", self.path.display());
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Text read from standard input until EOF
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinText;

impl TextSource for StdinText {
    fn read_text(&self) -> Result<String> {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    }
}
