//! Numeric literal formatting.
//!
//! Numbers are rounded to a fixed number of decimals and printed with `.` as
//! the decimal point, trailing zeros removed. Output never depends on locale.

/// Decimal places used for every emitted number
pub const DEFAULT_PRECISION: usize = 10;

/// Maximum numbers per line in an array initializer
pub const ARRAY_BATCH: usize = 10;

/// Format a single value. Non-finite values become `0`.
pub fn format_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let mut text = format!("{:.*}", precision, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

/// Comma-separated list without spaces: `0.1,0.2,1`
pub fn number_list(values: &[f64], precision: usize) -> String {
    values
        .iter()
        .map(|&value| format_number(value, precision))
        .collect::<Vec<_>>()
        .join(",")
}

/// Split values into lines of at most `batch` numbers.
///
/// Every number is followed by a comma except the last one overall.
pub fn batch_lines(values: &[f64], precision: usize, batch: usize) -> Vec<String> {
    let batch = batch.max(1);
    let last = values.len().saturating_sub(1);

    values
        .chunks(batch)
        .enumerate()
        .map(|(chunk_index, chunk)| {
            let mut line = String::new();
            for (offset, &value) in chunk.iter().enumerate() {
                line.push_str(&format_number(value, precision));
                if chunk_index * batch + offset < last {
                    line.push(',');
                }
            }
            line
        })
        .collect()
}
