//! Determinism checks for rendered output.
//!
//! Rosefield guarantees that the same configuration and frame index produce
//! byte-identical frames. These helpers run a producer several times and
//! report the first differing byte, if any.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// If non-deterministic, the first difference found.
    pub diff_info: Option<DiffInfo>,
}

/// The first byte difference found between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Byte offset of the difference.
    pub offset: usize,
    /// Byte from the first run, if it has one at `offset`.
    pub expected: Option<u8>,
    /// Byte from the differing run, if it has one at `offset`.
    pub actual: Option<u8>,
    /// Which run differed (0-based).
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {} differs at byte {}: expected {:?}, got {:?}",
            self.run_index, self.offset, self.expected, self.actual
        )
    }
}

impl DeterminismResult {
    /// Panics with the first difference if the runs differed.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "output is not deterministic over {} runs ({} bytes): {}",
                self.runs, self.output_size, diff
            );
        }
    }
}

/// Runs `generate_fn` `runs` times and compares the outputs byte for byte.
///
/// # Panics
/// Panics if `runs < 2`.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference = reference.as_ref();
    let hash = compute_hash(reference);

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(diff) = find_first_difference(reference, output.as_ref(), run_index) {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                output_size: reference.len(),
                hash,
                diff_info: Some(diff),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_size: reference.len(),
        hash,
        diff_info: None,
    }
}

/// BLAKE3 hash of `data` as hex.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

fn find_first_difference(expected: &[u8], actual: &[u8], run_index: usize) -> Option<DiffInfo> {
    let offset = expected
        .iter()
        .zip(actual)
        .position(|(a, b)| a != b)
        .or_else(|| (expected.len() != actual.len()).then(|| expected.len().min(actual.len())))?;

    Some(DiffInfo {
        offset,
        expected: expected.get(offset).copied(),
        actual: actual.get(offset).copied(),
        run_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_identical_runs_pass() {
        let result = verify_determinism(|| vec![1u8, 2, 3], 3);
        assert!(result.is_deterministic);
        assert_eq!(result.output_size, 3);
        result.assert_deterministic();
    }

    #[test]
    fn test_reports_first_difference() {
        let calls = Cell::new(0u8);
        let result = verify_determinism(
            || {
                calls.set(calls.get() + 1);
                vec![0u8, calls.get()]
            },
            2,
        );
        assert!(!result.is_deterministic);
        assert_eq!(
            result.diff_info,
            Some(DiffInfo {
                offset: 1,
                expected: Some(1),
                actual: Some(2),
                run_index: 1,
            })
        );
    }

    #[test]
    fn test_length_mismatch_is_a_difference() {
        let calls = Cell::new(0usize);
        let result = verify_determinism(
            || {
                calls.set(calls.get() + 1);
                vec![7u8; calls.get()]
            },
            2,
        );
        let diff = result.diff_info.unwrap();
        assert_eq!(diff.offset, 1);
        assert_eq!(diff.expected, None);
        assert_eq!(diff.actual, Some(7));
    }
}
