use crate::domain::{ChecksumReport, ComparisonResult, FileHashComparison, HashSum};

/// Compares a previously recorded digest against a freshly computed one.
/// The comparison is a case-sensitive exact string equality; hex digests
/// exceed native integer ranges, so no numeric conversion is involved.
pub struct HashComparator;

impl HashComparator {
    pub fn compare_hashes(original: &HashSum, current: &HashSum) -> FileHashComparison {
        let result = if original.hash_sum == current.hash_sum {
            ComparisonResult::Match
        } else {
            ComparisonResult::NotMatch
        };

        FileHashComparison {
            filename: current.filename.clone(),
            hash_type: original.hash_type.clone(),
            original_hash_sum: original.hash_sum.clone(),
            current_hash_sum: current.hash_sum.clone(),
            result,
        }
    }

    /// Checks every computed sum in the report against one recorded digest.
    pub fn compare_report(report: &ChecksumReport, original_hash_sum: &str) -> Vec<FileHashComparison> {
        report
            .sums
            .iter()
            .map(|current| {
                let original = HashSum {
                    filename: current.filename.clone(),
                    hash_type: current.hash_type.clone(),
                    hash_sum: original_hash_sum.to_string(),
                };
                Self::compare_hashes(&original, current)
            })
            .collect()
    }
}
