//! Text reader for histograms.
//!
//! Input is a stream of whitespace-separated `(integer, real)` token pairs;
//! line breaks carry no meaning. Pairs whose weight is exactly zero are
//! dropped because they carry no information and would create
//! zero-probability bins downstream.
use crate::histogram::{
    data::Histogram,
    errors::{HistError, HistResult},
};
use std::{fs, io::Read, path::Path};

/// Read a histogram from a file on disk.
///
/// Errors
/// ------
/// - `HistError::InvalidInput` when the file cannot be opened or read.
/// - Any error from [`parse_histogram`].
pub fn read_histogram<P: AsRef<Path>>(path: P) -> HistResult<Histogram> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| HistError::InvalidInput {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    parse_histogram(&text)
}

/// Read a histogram from any byte source (stdin, sockets, in-memory buffers).
pub fn read_histogram_from<R: Read>(mut reader: R, source: &str) -> HistResult<Histogram> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|err| HistError::InvalidInput {
        path: source.to_string(),
        reason: err.to_string(),
    })?;
    parse_histogram(&text)
}

/// Parse whitespace-separated `(bin, weight)` pairs.
///
/// Errors
/// ------
/// - `HistError::MalformedInput` for a token that does not parse, a trailing
///   bin without a weight, or a negative / non-finite weight.
/// - `HistError::EmptyHistogram` when no non-zero pair remains.
pub fn parse_histogram(text: &str) -> HistResult<Histogram> {
    let mut pairs = Vec::new();
    let mut tokens = text.split_whitespace().enumerate();

    while let Some((bin_index, bin_token)) = tokens.next() {
        let bin: i64 = bin_token.parse().map_err(|_| HistError::MalformedInput {
            token_index: bin_index,
            token: bin_token.to_string(),
            reason: "bin value must be an integer",
        })?;

        let (weight_index, weight_token) =
            tokens.next().ok_or_else(|| HistError::MalformedInput {
                token_index: bin_index,
                token: bin_token.to_string(),
                reason: "bin value has no matching weight",
            })?;
        let weight: f64 = weight_token.parse().map_err(|_| HistError::MalformedInput {
            token_index: weight_index,
            token: weight_token.to_string(),
            reason: "weight must be a real number",
        })?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(HistError::MalformedInput {
                token_index: weight_index,
                token: weight_token.to_string(),
                reason: "weight must be finite and non-negative",
            });
        }

        if weight != 0.0 {
            pairs.push((bin, weight));
        }
    }

    if pairs.is_empty() {
        return Err(HistError::EmptyHistogram);
    }
    Histogram::from_pairs(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parsing pairs across arbitrary whitespace, dropping zero weights.
    // - Malformed-token, dangling-bin, and empty-input errors.
    // - File-level failures surfacing as `InvalidInput`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pairs parse regardless of line layout and zero weights are dropped.
    //
    // Given
    // -----
    // - "0 1.5\n1 0\n2   3e0 3\n4.25" (pair 1 has zero weight, pair 3 spans
    //   a line break).
    //
    // Expect
    // ------
    // - Bins [0, 2, 3] with weights [1.5, 3.0, 4.25].
    fn parse_drops_zero_weights_and_ignores_line_layout() {
        let h = parse_histogram("0 1.5\n1 0\n2   3e0 3\n4.25").unwrap();

        let pairs: Vec<(i64, f64)> = h.iter().collect();
        assert_eq!(pairs, vec![(0, 1.5), (2, 3.0), (3, 4.25)]);
    }

    #[test]
    // Purpose
    // -------
    // Malformed input is reported, not silently truncated.
    //
    // Given
    // -----
    // - A non-integer bin, a non-numeric weight, a dangling bin, and a
    //   negative weight.
    //
    // Expect
    // ------
    // - `MalformedInput` with the offending token index each time.
    fn parse_rejects_malformed_tokens() {
        let bad_bin = parse_histogram("1.5 2.0").unwrap_err();
        assert!(matches!(bad_bin, HistError::MalformedInput { token_index: 0, .. }));

        let bad_weight = parse_histogram("1 2.0 2 abc").unwrap_err();
        assert!(matches!(bad_weight, HistError::MalformedInput { token_index: 3, .. }));

        let dangling = parse_histogram("1 2.0 3").unwrap_err();
        assert!(matches!(dangling, HistError::MalformedInput { token_index: 2, .. }));

        let negative = parse_histogram("1 -2.0").unwrap_err();
        assert!(matches!(negative, HistError::MalformedInput { token_index: 1, .. }));
    }

    #[test]
    // Purpose
    // -------
    // A trailing bin without a weight is reported with its own token.
    //
    // Given
    // -----
    // - Complete pairs followed by a lone bin "7" on the last line.
    //
    // Expect
    // ------
    // - `MalformedInput { token_index: 4, token: "7", reason: "bin value has
    //   no matching weight" }`; the complete pairs before it parse cleanly.
    fn parse_reports_dangling_bin_token() {
        let err = parse_histogram("1 2.0\n2 3.0\n7").unwrap_err();

        assert_eq!(
            err,
            HistError::MalformedInput {
                token_index: 4,
                token: "7".to_string(),
                reason: "bin value has no matching weight",
            }
        );
        assert_eq!(parse_histogram("1 2.0\n2 3.0").unwrap().len(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Input with nothing but zero weights has nothing to fit.
    //
    // Given
    // -----
    // - Empty text and text with only zero-weight pairs.
    //
    // Expect
    // ------
    // - `HistError::EmptyHistogram` in both cases.
    fn parse_rejects_empty_input() {
        assert_eq!(parse_histogram("").unwrap_err(), HistError::EmptyHistogram);
        assert_eq!(parse_histogram("1 0 2 0.0").unwrap_err(), HistError::EmptyHistogram);
    }

    #[test]
    // Purpose
    // -------
    // File reading works end to end and a missing file is "Bad filename".
    //
    // Given
    // -----
    // - A temp file containing "5 2\n6 6\n" and a path that does not exist.
    //
    // Expect
    // ------
    // - Two bins read back; `InvalidInput` for the missing path.
    fn read_histogram_from_file_and_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "5 2").unwrap();
        writeln!(file, "6 6").unwrap();

        let h = read_histogram(file.path()).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h.total_mass(), 8.0);

        let missing = read_histogram("/definitely/not/here/histogram.txt").unwrap_err();
        assert!(matches!(missing, HistError::InvalidInput { .. }));
        assert!(missing.to_string().starts_with("Bad filename"));
    }

    #[test]
    // Purpose
    // -------
    // The generic reader accepts in-memory sources.
    //
    // Given
    // -----
    // - A byte slice with two pairs.
    //
    // Expect
    // ------
    // - A two-bin histogram.
    fn read_histogram_from_accepts_byte_sources() {
        let h = read_histogram_from("10 1\n11 3".as_bytes(), "<memory>").unwrap();

        assert_eq!(h.bins().to_vec(), vec![10, 11]);
    }
}
