//! Download targets
//!
//! Where a finished invoice goes. The command line writes into a directory,
//! tests and embedders collect downloads in memory.

use std::io;
use std::path::{Path, PathBuf};

use geladaria_core::ShopProfile;
use parking_lot::Mutex;
use sanitize_filename::sanitize;
use tracing::info;

use crate::blob::Blob;

/// MIME type of exported invoices
pub const PDF_MIME: &str = "application/pdf";

/// Download file name for a customer of the default shop, `Fatura_<name>.pdf`
pub fn invoice_filename(name: &str) -> String {
    ShopProfile::default().download_filename(name)
}

/// Outcome of a completed download
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadReceipt {
    /// File name requested by the exporter
    pub filename: String,
    /// Where the file landed, for targets backed by a filesystem
    pub path: Option<PathBuf>,
    /// Size in bytes
    pub bytes: usize,
}

/// A destination for downloads
pub trait DownloadTarget: Send + Sync {
    /// Store a blob under the given file name
    fn save(&self, filename: &str, blob: &Blob) -> io::Result<DownloadReceipt>;
}

/// Writes downloads into a directory
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadTarget for DirectoryTarget {
    fn save(&self, filename: &str, blob: &Blob) -> io::Result<DownloadReceipt> {
        std::fs::create_dir_all(&self.dir)?;

        // Customer names may contain path separators
        let safe_name = safe_filename(filename);
        let path = self.dir.join(&safe_name);
        std::fs::write(&path, blob.data())?;

        info!(path = %path.display(), bytes = blob.len(), "invoice written");
        Ok(DownloadReceipt {
            filename: filename.to_string(),
            path: Some(path),
            bytes: blob.len(),
        })
    }
}

/// Longest file name most filesystems accept, in bytes
const MAX_FILENAME_BYTES: usize = 255;

/// Sanitize the stem and keep the extension, so truncation never eats `.pdf`
fn safe_filename(filename: &str) -> String {
    let extension = filename
        .rsplit_once('.')
        .filter(|(_, ext)| !ext.is_empty() && ext.len() <= 8)
        .filter(|(_, ext)| ext.chars().all(|c| c.is_ascii_alphanumeric()));
    let Some((stem, ext)) = extension else {
        return sanitize(filename);
    };

    let mut stem = sanitize(stem);
    let mut end = MAX_FILENAME_BYTES - ext.len() - 1;
    if stem.len() > end {
        while !stem.is_char_boundary(end) {
            end -= 1;
        }
        stem.truncate(end);
    }
    format!("{}.{}", stem, ext)
}

/// A download collected by [`MemoryTarget`]
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub filename: String,
    pub blob: Blob,
}

/// Collects downloads in memory
#[derive(Debug, Default)]
pub struct MemoryTarget {
    downloads: Mutex<Vec<Download>>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected downloads
    pub fn downloads(&self) -> Vec<Download> {
        self.downloads.lock().clone()
    }

    /// Remove and return the collected downloads
    pub fn take(&self) -> Vec<Download> {
        std::mem::take(&mut *self.downloads.lock())
    }

    pub fn len(&self) -> usize {
        self.downloads.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.downloads.lock().is_empty()
    }
}

impl DownloadTarget for MemoryTarget {
    fn save(&self, filename: &str, blob: &Blob) -> io::Result<DownloadReceipt> {
        self.downloads.lock().push(Download {
            filename: filename.to_string(),
            blob: blob.clone(),
        });
        Ok(DownloadReceipt {
            filename: filename.to_string(),
            path: None,
            bytes: blob.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> Blob {
        Blob::new(b"%PDF-1.7 test".to_vec(), PDF_MIME)
    }

    #[test]
    fn test_invoice_filename() {
        assert_eq!(invoice_filename("Maria"), "Fatura_Maria.pdf");
        assert_eq!(invoice_filename("Ana Paula"), "Fatura_Ana Paula.pdf");
        assert_eq!(invoice_filename(""), "Fatura_.pdf");
    }

    #[test]
    fn test_directory_target_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::new(dir.path().join("out"));

        let receipt = target.save("Fatura_Maria.pdf", &pdf()).unwrap();
        let path = receipt.path.unwrap();
        assert_eq!(path, dir.path().join("out").join("Fatura_Maria.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 test");
        assert_eq!(receipt.bytes, 13);
    }

    #[test]
    fn test_directory_target_sanitizes_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::new(dir.path());

        let receipt = target.save("Fatura_../../etc/passwd.pdf", &pdf()).unwrap();
        let path = receipt.path.unwrap();
        assert_eq!(path.parent().unwrap(), dir.path());
        assert!(path.exists());
        assert_eq!(receipt.filename, "Fatura_../../etc/passwd.pdf");
    }

    #[test]
    fn test_safe_filename_keeps_extension() {
        assert_eq!(safe_filename("Fatura_Maria.pdf"), "Fatura_Maria.pdf");
        assert_eq!(safe_filename("Fatura_a/b.pdf"), "Fatura_ab.pdf");

        let long = format!("Fatura_{}.pdf", "ç".repeat(300));
        let safe = safe_filename(&long);
        assert!(safe.len() <= MAX_FILENAME_BYTES);
        assert!(safe.ends_with(".pdf"));
        assert!(safe.starts_with("Fatura_ç"));
    }

    #[test]
    fn test_directory_target_long_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectoryTarget::new(dir.path());

        let filename = invoice_filename(&"Maria".repeat(80));
        let receipt = target.save(&filename, &pdf()).unwrap();
        let path = receipt.path.unwrap();
        assert_eq!(path.extension().unwrap(), "pdf");
        assert!(path.exists());
        assert_eq!(receipt.filename, filename);
    }

    #[test]
    fn test_memory_target_collects() {
        let target = MemoryTarget::new();
        assert!(target.is_empty());

        target.save("Fatura_A.pdf", &pdf()).unwrap();
        target.save("Fatura_B.pdf", &pdf()).unwrap();
        assert_eq!(target.len(), 2);

        let downloads = target.take();
        assert_eq!(downloads[0].filename, "Fatura_A.pdf");
        assert_eq!(downloads[1].blob.mime(), PDF_MIME);
        assert!(target.is_empty());
    }
}
