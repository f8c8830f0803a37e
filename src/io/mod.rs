//! File and clipboard collaborators used by the panels

use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};

pub const XLSX_FILE_NAME: &str = "data.xlsx";
pub const CSV_FILE_NAME: &str = "data.csv";
pub const JSON_FILE_NAME: &str = "data.json";

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_MIME: &str = "text/csv;charset=utf-8;";
pub const JSON_MIME: &str = "application/json";

/// A file handed to a panel by the user
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, keeping only its file name
    pub fn from_path(path: &Path) -> ConvertResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| ConvertError::io(e.to_string(), Some(path.to_path_buf())))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Destination for "download" actions
pub trait FileSink {
    fn save(&mut self, content: &[u8], file_name: &str, mime_type: &str) -> ConvertResult<()>;
}

/// Writes downloads into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FileSink for DirectorySink {
    fn save(&mut self, content: &[u8], file_name: &str, mime_type: &str) -> ConvertResult<()> {
        let path = self.dir.join(file_name);
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(&path, content))
            .map_err(|e| ConvertError::download(e.to_string(), Some(path.clone())))?;
        tracing::info!(path = %path.display(), mime = mime_type, bytes = content.len(), "saved file");
        self.written.push(path);
        Ok(())
    }
}

/// A file captured in memory
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// Keeps downloads in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<SavedFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, name: &str) -> Option<&SavedFile> {
        self.files.iter().rev().find(|file| file.name == name)
    }
}

impl FileSink for MemorySink {
    fn save(&mut self, content: &[u8], file_name: &str, mime_type: &str) -> ConvertResult<()> {
        self.files.push(SavedFile {
            name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            content: content.to_vec(),
        });
        Ok(())
    }
}

/// Destination for "copy" actions
pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str) -> ConvertResult<()>;
}

/// The operating system clipboard
#[cfg(feature = "clipboard")]
#[derive(Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> ConvertResult<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ConvertError::clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ConvertError::clipboard(e.to_string()))
    }
}

/// Holds the last copied text
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn copy_text(&mut self, text: &str) -> ConvertResult<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
