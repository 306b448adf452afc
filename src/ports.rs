use crate::domain::{ChecksumReport, FileEntry, HashAlgorithm};
use anyhow::Result;
use std::path::Path;

pub trait FileSystemPort {
    fn create(&self, path: &Path) -> FileEntry;
}

pub trait HashingPort {
    fn hash_file(&self, path: &Path, algorithm: HashAlgorithm) -> Result<String>;
}

pub trait OutputPort {
    fn write_report(&self, report: &ChecksumReport) -> Result<()>;
}

pub trait ProgressPort {
    fn start(&self, total: u64);
    fn update(&self, processed: u64);
    fn finish(&self);
}
