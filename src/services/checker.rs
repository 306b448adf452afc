use crate::domain::{ChecksumReport, FileEntry, HashAlgorithm, HashSum, InvalidFile};
use crate::ports::{HashingPort, ProgressPort};
use anyhow::Result;

/// Per-file, per-algorithm digest computation unit. The digest is computed
/// lazily and memoized; once cached it never changes.
pub struct HashCalculator {
    file: FileEntry,
    algorithm: HashAlgorithm,
    cached: Option<String>,
}

impl HashCalculator {
    /// The bound file must be valid; routing invalid files here is a
    /// programming error, not a recoverable condition.
    pub fn new(algorithm: HashAlgorithm, file: FileEntry) -> Self {
        assert!(
            file.is_valid(),
            "cannot hash invalid file: {}",
            file.path().display()
        );
        Self {
            file,
            algorithm,
            cached: None,
        }
    }

    /// Computes the digest if it is not cached yet. Idempotent; a second
    /// call never re-reads the file.
    pub fn calculate(&mut self, hasher: &dyn HashingPort) -> Result<()> {
        if self.cached.is_none() {
            let sum = hasher.hash_file(self.file.path(), self.algorithm)?;
            self.cached = Some(sum);
        }
        Ok(())
    }

    /// Lazy accessor: computes on first use, then always returns the same
    /// string.
    pub fn string_hash_sum(&mut self, hasher: &dyn HashingPort) -> Result<String> {
        self.calculate(hasher)?;
        Ok(self.cached.clone().unwrap_or_default())
    }

    pub fn hash_sum(&mut self, hasher: &dyn HashingPort) -> Result<HashSum> {
        let hash_sum = self.string_hash_sum(hasher)?;
        Ok(HashSum {
            filename: self.file.path().display().to_string(),
            hash_type: self.algorithm.as_str().to_string(),
            hash_sum,
        })
    }

    pub fn cached_sum(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn file(&self) -> &FileEntry {
        &self.file
    }

    pub fn file_path(&self) -> String {
        self.file.path().display().to_string()
    }
}

/// Builds calculators from algorithm names, rejecting unknown names before
/// any file is touched.
pub struct HashFactory;

impl HashFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn hash_file(&self, hashtype: &str, file: FileEntry) -> Result<HashCalculator> {
        let algorithm = HashAlgorithm::from_name(hashtype)?;
        Ok(self.create(algorithm, file))
    }

    pub fn create(&self, algorithm: HashAlgorithm, file: FileEntry) -> HashCalculator {
        HashCalculator::new(algorithm, file)
    }
}

impl Default for HashFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Buckets files by validity, drives the sequential bulk hash run, and
/// assembles the final report.
pub struct Checker<H, P> {
    hasher: H,
    progress: P,
    hash_factory: HashFactory,
    valid_hashes: Vec<HashCalculator>,
    invalid_files: Vec<FileEntry>,
    read_failures: Vec<(String, String)>,
    show_progress: bool,
}

impl<H, P> Checker<H, P>
where
    H: HashingPort,
    P: ProgressPort,
{
    pub fn new(hasher: H, progress: P) -> Self {
        Self {
            hasher,
            progress,
            hash_factory: HashFactory::new(),
            valid_hashes: Vec::new(),
            invalid_files: Vec::new(),
            read_failures: Vec::new(),
            show_progress: false,
        }
    }

    pub fn set_show_progress(&mut self, value: bool) {
        self.show_progress = value;
    }

    /// Routes the file: valid entries get a deferred calculator, invalid
    /// ones land in the invalid bucket. No hashing happens here.
    pub fn add(&mut self, file: FileEntry, algorithm: HashAlgorithm) {
        if file.is_valid() {
            self.valid_hashes.push(self.hash_factory.create(algorithm, file));
        } else {
            self.invalid_files.push(file);
        }
    }

    /// Sequentially computes every valid entry's digest, advancing the
    /// progress bar after each completion. A read failure (e.g. the file
    /// vanished since validation) is captured for the report and the
    /// remaining files still get hashed.
    pub fn calculate_hash_sums(&mut self) {
        let show_progress = self.show_progress;
        let total = self.valid_hashes.len() as u64;
        if show_progress {
            self.progress.start(total);
        }

        let hasher = &self.hasher;
        let mut failed = Vec::new();
        for (done, calculator) in self.valid_hashes.iter_mut().enumerate() {
            if let Err(err) = calculator.calculate(hasher) {
                failed.push((calculator.file_path(), err.to_string()));
            }
            if show_progress {
                self.progress.update(done as u64 + 1);
            }
        }

        if show_progress {
            self.progress.finish();
        }

        if !failed.is_empty() {
            self.valid_hashes.retain(|c| c.cached_sum().is_some());
            self.read_failures.extend(failed);
        }
    }

    pub fn valid_hashes(&self) -> &[HashCalculator] {
        &self.valid_hashes
    }

    pub fn invalid_files(&self) -> &[FileEntry] {
        &self.invalid_files
    }

    /// Emits `(hexdigest, path)` pairs in bucket order plus one explained
    /// entry per invalid file and per captured read failure.
    pub fn report(&mut self, algorithm: HashAlgorithm) -> Result<ChecksumReport> {
        let mut report = ChecksumReport::new(algorithm);

        let hasher = &self.hasher;
        for calculator in self.valid_hashes.iter_mut() {
            report.sums.push(calculator.hash_sum(hasher)?);
        }

        for file in &self.invalid_files {
            report.invalid_files.push(InvalidFile {
                path: file.path().display().to_string(),
                reason: file.explain_status().to_string(),
            });
        }

        for (path, reason) in &self.read_failures {
            report.invalid_files.push(InvalidFile {
                path: path.clone(),
                reason: reason.clone(),
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FileFactory, MultiAlgorithmHasher};
    use crate::ports::FileSystemPort;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const FIXTURE: &[u8] = b"hello hash file!\n";
    const FIXTURE_MD5: &str = "10ecce765580b4431a8585d59af127d2";
    const FIXTURE_SHA256: &str =
        "1c87cc4bb02c5be00d7a367ca3270bd4f30303638117ae08ed2c14b3ca1765db";

    struct NoProgress;

    impl ProgressPort for NoProgress {
        fn start(&self, _total: u64) {}
        fn update(&self, _processed: u64) {}
        fn finish(&self) {}
    }

    fn fixture_entry(dir: &Path) -> FileEntry {
        let path = dir.join("fixture.txt");
        fs::write(&path, FIXTURE).unwrap();
        FileFactory::new().create(&path)
    }

    fn new_checker() -> Checker<MultiAlgorithmHasher, NoProgress> {
        Checker::new(MultiAlgorithmHasher::new(), NoProgress)
    }

    #[test]
    fn invalid_file_goes_to_invalid_bucket() {
        let dir = tempdir().unwrap();
        let missing = FileFactory::new().create(&dir.path().join("gone.txt"));

        let mut checker = new_checker();
        checker.add(missing, HashAlgorithm::Sha256);

        assert!(checker.valid_hashes().is_empty());
        assert_eq!(checker.invalid_files().len(), 1);
    }

    #[test]
    fn valid_file_goes_to_valid_bucket() {
        let dir = tempdir().unwrap();
        let mut checker = new_checker();
        checker.add(fixture_entry(dir.path()), HashAlgorithm::Sha256);

        assert_eq!(checker.valid_hashes().len(), 1);
        assert!(checker.invalid_files().is_empty());
    }

    #[test]
    fn one_of_each_fills_both_buckets() {
        let dir = tempdir().unwrap();
        let mut checker = new_checker();
        checker.add(fixture_entry(dir.path()), HashAlgorithm::Sha256);
        checker.add(
            FileFactory::new().create(&dir.path().join("gone.txt")),
            HashAlgorithm::Sha256,
        );

        assert_eq!(checker.valid_hashes().len(), 1);
        assert_eq!(checker.invalid_files().len(), 1);
    }

    #[test]
    fn two_algorithms_on_one_file_are_independent() {
        let dir = tempdir().unwrap();
        let entry = fixture_entry(dir.path());

        let mut checker = new_checker();
        checker.add(entry.clone(), HashAlgorithm::Md5);
        checker.add(entry, HashAlgorithm::Sha256);
        checker.calculate_hash_sums();

        let report = checker.report(HashAlgorithm::Sha256).unwrap();
        assert_eq!(report.sums.len(), 2);
        assert_eq!(report.sums[0].hash_sum, FIXTURE_MD5);
        assert_eq!(report.sums[1].hash_sum, FIXTURE_SHA256);
    }

    #[test]
    fn hash_sum_is_memoized() {
        let dir = tempdir().unwrap();
        let hasher = MultiAlgorithmHasher::new();
        let mut calculator = HashCalculator::new(HashAlgorithm::Sha1, fixture_entry(dir.path()));

        let first = calculator.string_hash_sum(&hasher).unwrap();
        let second = calculator.string_hash_sum(&hasher).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "64bfac76f45bf55fbce0bca602739d6de8461077");
    }

    #[test]
    fn memoized_sum_survives_file_deletion() {
        let dir = tempdir().unwrap();
        let entry = fixture_entry(dir.path());
        let path = entry.path().to_path_buf();

        let hasher = MultiAlgorithmHasher::new();
        let mut calculator = HashCalculator::new(HashAlgorithm::Md5, entry);
        let first = calculator.string_hash_sum(&hasher).unwrap();

        fs::remove_file(&path).unwrap();
        let second = calculator.string_hash_sum(&hasher).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "cannot hash invalid file")]
    fn hashing_an_invalid_file_panics() {
        let entry = FileEntry::new("gone.txt".into(), crate::domain::FileStatus::NonExistent);
        let _ = HashCalculator::new(HashAlgorithm::Md5, entry);
    }

    #[test]
    fn factory_rejects_unknown_hash_type() {
        let dir = tempdir().unwrap();
        let entry = fixture_entry(dir.path());
        assert!(HashFactory::new().hash_file("crc32", entry).is_err());
    }

    #[test]
    fn factory_accepts_lowercase_hash_type() {
        let dir = tempdir().unwrap();
        let entry = fixture_entry(dir.path());
        let calculator = HashFactory::new().hash_file("sha384", entry).unwrap();
        assert_eq!(calculator.algorithm(), HashAlgorithm::Sha384);
    }

    // A file vanishing between validation and hashing is reported as a
    // failure for that file only; the rest of the batch still completes.
    #[test]
    fn read_failure_is_isolated_per_file() {
        let dir = tempdir().unwrap();
        let surviving = fixture_entry(dir.path());

        let doomed_path = dir.path().join("doomed.txt");
        fs::write(&doomed_path, b"short lived").unwrap();
        let doomed = FileFactory::new().create(&doomed_path);

        let mut checker = new_checker();
        checker.add(doomed, HashAlgorithm::Sha256);
        checker.add(surviving, HashAlgorithm::Sha256);

        fs::remove_file(&doomed_path).unwrap();
        checker.calculate_hash_sums();

        let report = checker.report(HashAlgorithm::Sha256).unwrap();
        assert_eq!(report.sums.len(), 1);
        assert_eq!(report.sums[0].hash_sum, FIXTURE_SHA256);
        assert_eq!(report.invalid_files.len(), 1);
        assert!(report.invalid_files[0].path.ends_with("doomed.txt"));
    }

    #[test]
    fn report_order_follows_insertion() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, b"first").unwrap();
        fs::write(&b, b"second").unwrap();

        let factory = FileFactory::new();
        let mut checker = new_checker();
        checker.add(factory.create(&b), HashAlgorithm::Md5);
        checker.add(factory.create(&a), HashAlgorithm::Md5);
        checker.calculate_hash_sums();

        let report = checker.report(HashAlgorithm::Md5).unwrap();
        assert!(report.sums[0].filename.ends_with("b.txt"));
        assert!(report.sums[1].filename.ends_with("a.txt"));
    }
}
