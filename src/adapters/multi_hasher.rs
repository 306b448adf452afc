use crate::domain::HashAlgorithm;
use crate::ports::HashingPort;
use anyhow::Result;
use memmap2::MmapOptions;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Streams file contents through one of the five supported digest engines
/// and renders the result as lowercase hex. Large files go through mmap,
/// everything else through buffered reads.
pub struct MultiAlgorithmHasher {
    mmap_threshold: u64,
}

impl MultiAlgorithmHasher {
    pub fn new() -> Self {
        Self {
            mmap_threshold: 64 * 1024 * 1024,
        }
    }

    pub fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }

    fn hash_with_mmap(&self, path: &Path, algorithm: HashAlgorithm) -> Result<String> {
        let file = File::open(path)?;
        let mmap = unsafe { MmapOptions::new().map(&file)? };

        let hash = match algorithm {
            HashAlgorithm::Md5 => {
                let mut hasher = md5::Context::new();
                hasher.consume(&mmap[..]);
                format!("{:x}", hasher.compute())
            }
            HashAlgorithm::Sha1 => Self::digest_slice::<Sha1>(&mmap[..]),
            HashAlgorithm::Sha256 => Self::digest_slice::<Sha256>(&mmap[..]),
            HashAlgorithm::Sha384 => Self::digest_slice::<Sha384>(&mmap[..]),
            HashAlgorithm::Sha512 => Self::digest_slice::<Sha512>(&mmap[..]),
        };

        Ok(hash)
    }

    fn hash_with_buffered_io(&self, path: &Path, algorithm: HashAlgorithm) -> Result<String> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut buffer = [0; 8192];

        match algorithm {
            HashAlgorithm::Md5 => {
                let mut hasher = md5::Context::new();
                Self::process_buffered_data(&mut reader, &mut buffer, |data| {
                    hasher.consume(data);
                })?;
                Ok(format!("{:x}", hasher.compute()))
            }
            HashAlgorithm::Sha1 => Self::digest_reader::<Sha1>(&mut reader, &mut buffer),
            HashAlgorithm::Sha256 => Self::digest_reader::<Sha256>(&mut reader, &mut buffer),
            HashAlgorithm::Sha384 => Self::digest_reader::<Sha384>(&mut reader, &mut buffer),
            HashAlgorithm::Sha512 => Self::digest_reader::<Sha512>(&mut reader, &mut buffer),
        }
    }

    fn digest_slice<D: Digest>(data: &[u8]) -> String {
        let mut hasher = D::new();
        hasher.update(data);
        hex_string(hasher.finalize().as_slice())
    }

    fn digest_reader<D: Digest>(reader: &mut BufReader<File>, buffer: &mut [u8]) -> Result<String> {
        let mut hasher = D::new();
        Self::process_buffered_data(reader, buffer, |data| {
            hasher.update(data);
        })?;
        Ok(hex_string(hasher.finalize().as_slice()))
    }

    fn process_buffered_data<F>(reader: &mut BufReader<File>, buffer: &mut [u8], mut update_fn: F) -> Result<()>
    where
        F: FnMut(&[u8]),
    {
        loop {
            let bytes_read = reader.read(buffer)?;
            if bytes_read == 0 {
                break;
            }
            update_fn(&buffer[..bytes_read]);
        }
        Ok(())
    }
}

impl Default for MultiAlgorithmHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl HashingPort for MultiAlgorithmHasher {
    fn hash_file(&self, path: &Path, algorithm: HashAlgorithm) -> Result<String> {
        let file_size = std::fs::metadata(path)?.len();

        if file_size >= self.mmap_threshold && file_size > 0 {
            self.hash_with_mmap(path, algorithm)
        } else {
            self.hash_with_buffered_io(path, algorithm)
        }
    }
}

/// Two lowercase hex digits per byte, no separators.
fn hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const FIXTURE: &[u8] = b"hello hash file!\n";
    const FIXTURE_SUMS: [(HashAlgorithm, &str); 5] = [
        (HashAlgorithm::Md5, "10ecce765580b4431a8585d59af127d2"),
        (HashAlgorithm::Sha1, "64bfac76f45bf55fbce0bca602739d6de8461077"),
        (
            HashAlgorithm::Sha256,
            "1c87cc4bb02c5be00d7a367ca3270bd4f30303638117ae08ed2c14b3ca1765db",
        ),
        (
            HashAlgorithm::Sha384,
            "3b6ef4867939c7f06f1f795b0b71397cb9157d9bb8cfbb5c981bcd340a05acef9305b437c5bf37afd8614d5192a18746",
        ),
        (
            HashAlgorithm::Sha512,
            "e6d9a26a9218533041ed8523e2265dfdffbcebcaa21801d2343297d2432f2ae8b5027c240530a4909b84920b4617fde4af6f55e30defa3848203fd876fff65c7",
        ),
    ];

    #[test]
    fn known_digests_buffered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fixture.txt");
        fs::write(&path, FIXTURE).unwrap();

        let hasher = MultiAlgorithmHasher::new();
        for (algorithm, expected) in FIXTURE_SUMS {
            let sum = hasher.hash_file(&path, algorithm).unwrap();
            assert_eq!(sum, expected, "{} digest mismatch", algorithm.as_str());
            assert_eq!(sum.len(), algorithm.digest_len() * 2);
        }
    }

    #[test]
    fn known_digests_mmap() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fixture.txt");
        fs::write(&path, FIXTURE).unwrap();

        // Threshold of 1 forces every non-empty file down the mmap path.
        let hasher = MultiAlgorithmHasher::new().with_mmap_threshold(1);
        for (algorithm, expected) in FIXTURE_SUMS {
            assert_eq!(hasher.hash_file(&path, algorithm).unwrap(), expected);
        }
    }

    #[test]
    fn empty_file_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, b"").unwrap();

        let hasher = MultiAlgorithmHasher::new();
        assert_eq!(
            hasher.hash_file(&path, HashAlgorithm::Md5).unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        let hasher = MultiAlgorithmHasher::new();
        assert!(hasher.hash_file(&path, HashAlgorithm::Sha256).is_err());
    }
}
