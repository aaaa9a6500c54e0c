use crate::error::ArchiveError;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

/// What a downloaded site archive contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub files: usize,
    pub uncompressed_bytes: u64,
    pub has_index: bool,
}

pub fn summarize(path: &Path) -> Result<ArchiveSummary, ArchiveError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut summary = ArchiveSummary {
        files: 0,
        uncompressed_bytes: 0,
        has_index: false,
    };

    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        summary.files += 1;
        summary.uncompressed_bytes += entry.size();
        if entry.name() == "index.html" {
            summary.has_index = true;
        }
    }

    Ok(summary)
}

/// Unpack an archive into `dest`. Entries escaping `dest` are refused by
/// the zip reader.
pub fn extract(path: &Path, dest: &Path) -> Result<(), ArchiveError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    std::fs::create_dir_all(dest)?;
    archive.extract(dest)?;
    Ok(())
}
