use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::util::to_upper_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha384 => "SHA384",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    /// Matches the name case-insensitively against the supported set.
    pub fn from_name(name: &str) -> Result<Self> {
        match to_upper_case(name).as_str() {
            "MD5" => Ok(HashAlgorithm::Md5),
            "SHA1" => Ok(HashAlgorithm::Sha1),
            "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA384" => Ok(HashAlgorithm::Sha384),
            "SHA512" => Ok(HashAlgorithm::Sha512),
            _ => bail!("unknown hash type: {}", name),
        }
    }

    /// Native digest length in bytes; the hex rendering is twice as long.
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Valid,
    NonExistent,
    IsDirectory,
    NotPermissive,
    NotReadable,
}

impl FileStatus {
    pub fn explain(&self) -> &'static str {
        match self {
            FileStatus::Valid => "File is valid.",
            FileStatus::NonExistent => "Was not found.",
            FileStatus::IsDirectory => "Is a directory.",
            FileStatus::NotPermissive => "No permissions to read.",
            FileStatus::NotReadable => "Could not read!",
        }
    }
}

/// A path together with the validity status observed at creation time.
/// The status is fixed once constructed; there is no re-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    status: FileStatus,
}

impl FileEntry {
    pub fn new(path: PathBuf, status: FileStatus) -> Self {
        Self { path, status }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> FileStatus {
        self.status
    }

    pub fn is_valid(&self) -> bool {
        self.status == FileStatus::Valid
    }

    pub fn explain_status(&self) -> &'static str {
        self.status.explain()
    }

    /// Byte length of valid files; invalid entries report 0.
    pub fn size(&self) -> u64 {
        if self.is_valid() {
            fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        }
    }
}

/// One computed digest: lowercase hex, two chars per digest byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashSum {
    pub filename: String,
    pub hash_type: String,
    pub hash_sum: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonResult {
    Match,
    NotMatch,
}

/// Outcome of checking a freshly computed digest against a recorded one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHashComparison {
    pub filename: String,
    pub hash_type: String,
    pub original_hash_sum: String,
    pub current_hash_sum: String,
    pub result: ComparisonResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvalidFile {
    pub path: String,
    pub reason: String,
}

/// Everything one run produced, in bucket insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct ChecksumReport {
    pub algorithm: String,
    pub sums: Vec<HashSum>,
    pub invalid_files: Vec<InvalidFile>,
}

impl ChecksumReport {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm: algorithm.as_str().to_string(),
            sums: Vec::new(),
            invalid_files: Vec::new(),
        }
    }
}
