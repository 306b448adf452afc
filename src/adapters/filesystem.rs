use crate::domain::{FileEntry, FileStatus};
use crate::ports::FileSystemPort;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Classifies paths into [`FileEntry`] values. Classification never fails;
/// the outcome is encoded in the entry's status.
pub struct FileFactory;

impl FileFactory {
    pub fn new() -> Self {
        Self
    }

    #[cfg(unix)]
    fn is_permissive(metadata: &fs::Metadata) -> bool {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o400 != 0
    }

    #[cfg(not(unix))]
    fn is_permissive(_metadata: &fs::Metadata) -> bool {
        // No owner-read bit to inspect; the probe read decides.
        true
    }

    /// Permission bits alone are not proof of readability (ACLs, mount
    /// state), so open the file and read a single byte as ground truth.
    /// The handle is closed on drop; nothing is written.
    fn is_readable(path: &Path) -> bool {
        let mut probe = [0u8; 1];
        match File::open(path) {
            Ok(mut file) => file.read(&mut probe).is_ok(),
            Err(_) => false,
        }
    }

    /// First matching rule wins: missing, directory, permission bit,
    /// probe read, then valid.
    fn classify(path: &Path) -> FileStatus {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(_) => return FileStatus::NonExistent,
        };

        if metadata.is_dir() {
            FileStatus::IsDirectory
        } else if !Self::is_permissive(&metadata) {
            FileStatus::NotPermissive
        } else if !Self::is_readable(path) {
            FileStatus::NotReadable
        } else {
            FileStatus::Valid
        }
    }
}

impl Default for FileFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemPort for FileFactory {
    fn create(&self, path: &Path) -> FileEntry {
        FileEntry::new(path.to_path_buf(), Self::classify(path))
    }
}
