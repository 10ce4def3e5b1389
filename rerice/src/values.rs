use anyhow::{Context, Result};
use std::path::Path;

/// Parse integers separated by whitespace or commas.
///
/// Lines starting with `#` are skipped.
pub fn parse_values(text: &str) -> Result<Vec<i64>> {
    let mut values = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        for token in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let value = token
                .parse::<i64>()
                .with_context(|| format!("line {}: invalid integer {:?}", line_no + 1, token))?;
            values.push(value);
        }
    }

    Ok(values)
}

/// Read a value file from disk
pub fn read_values_file(path: &Path) -> Result<Vec<i64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_values(&text)
}

/// One value per line, newline-terminated
pub fn format_values(values: &[i64]) -> String {
    let mut out = String::with_capacity(values.len() * 4);
    for v in values {
        out.push_str(&v.to_string());
        out.push('\n');
    }
    out
}
