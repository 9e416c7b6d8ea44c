//! Human-readable sizes and lists for hints and summaries.

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count with base-1024 units and at most two decimals,
/// e.g. `1536` → `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} Bytes", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, SIZE_UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// "a, b, and c"
    Conjunction,
    /// "a, b, or c"
    Disjunction,
}

impl ListStyle {
    fn word(&self) -> &'static str {
        match self {
            ListStyle::Conjunction => "and",
            ListStyle::Disjunction => "or",
        }
    }
}

/// Joins items the way en-US long list formatting does, serial comma included.
pub fn format_list<S: AsRef<str>>(items: &[S], style: ListStyle) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {} {}", first.as_ref(), style.word(), second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("{}, {} {}", head.join(", "), style.word(), last.as_ref())
        }
    }
}
