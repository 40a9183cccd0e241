use std::path::Path;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count with the largest unit that keeps the scaled value
/// below 1024, rounded to at most two decimal places. The unit table is
/// closed, so anything at or above 1024 GB still renders in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    format!("{} {}", two_decimals(scaled), SIZE_UNITS[unit])
}

// "1.00" -> "1", "1.50" -> "1.5", "1.43" -> "1.43"
fn two_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Declared media type for a file picked from disk, judged by extension.
pub fn media_type_for_path(path: &Path) -> String {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        "application/pdf".to_string()
    } else {
        "application/octet-stream".to_string()
    }
}

/// Wall-clock time formatted for local display, e.g. "14:03:27".
pub fn local_time_string() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
