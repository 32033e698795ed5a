use std::fs;
use std::path::{Path, PathBuf};

use crate::compose::VectorArtifact;
use crate::error::ExportError;

/// Filename stem used when a title has nothing usable in it
pub const DEFAULT_FILE_STEM: &str = "inscription";

/// Bytes handed to an export sink, with a suggested filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportPayload {
    /// The artifact's SVG markup; fails if the artifact has no paths
    pub fn svg(artifact: &VectorArtifact, title: Option<&str>) -> Result<Self, ExportError> {
        if artifact.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        Ok(Self {
            filename: format!("{}.svg", file_stem(title)),
            mime: "image/svg+xml",
            bytes: artifact.svg.as_bytes().to_vec(),
        })
    }

    /// Already-rendered PNG bytes
    pub fn png(bytes: Vec<u8>, title: Option<&str>) -> Result<Self, ExportError> {
        if bytes.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        Ok(Self {
            filename: format!("{}.png", file_stem(title)),
            mime: "image/png",
            bytes,
        })
    }
}

/// Turn a free-form title into a safe filename stem
pub fn file_stem(title: Option<&str>) -> String {
    let mut stem = String::new();
    let mut pending_dash = false;
    for c in title.unwrap_or_default().trim().chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !stem.is_empty() {
                stem.push('-');
            }
            pending_dash = false;
            stem.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if stem.is_empty() {
        DEFAULT_FILE_STEM.to_owned()
    } else {
        stem
    }
}

/// Where exported bytes go (browser download, save dialog, directory, ...)
pub trait ExportSink {
    fn deliver(&self, payload: &ExportPayload) -> Result<(), ExportError>;
}

/// Writes payloads into a directory under their suggested names
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, payload: &ExportPayload) -> PathBuf {
        self.dir.join(&payload.filename)
    }
}

impl ExportSink for DirectoryExporter {
    fn deliver(&self, payload: &ExportPayload) -> Result<(), ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(payload);
        write_atomically(&path, &payload.bytes)?;
        log::info!("Exported {} ({} bytes)", path.display(), payload.bytes.len());
        Ok(())
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}
