/// Parse an announced size such as `"2.14 GB"`, `"700 MiB"` or `"123456"`.
///
/// Decimal units (`KB`, `MB`, `GB`, `TB`) are powers of 1000 and binary units
/// (`KiB`, `MiB`, `GiB`, `TiB`) powers of 1024. A lone comma is read as the
/// decimal separator; commas next to a dot are thousands separators.
pub fn parse_size_bytes(raw: &str) -> Option<u64> {
    let s = raw.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    if number.is_empty() {
        return None;
    }

    let number = if number.contains('.') {
        number.replace(',', "")
    } else {
        number.replace(',', ".")
    };
    let value: f64 = number.parse().ok()?;

    let multiplier: f64 = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" | "byte" | "bytes" => 1.0,
        "k" | "kb" => 1e3,
        "m" | "mb" => 1e6,
        "g" | "gb" => 1e9,
        "t" | "tb" => 1e12,
        "kib" => 1024.0,
        "mib" => 1024.0 * 1024.0,
        "gib" => 1024.0 * 1024.0 * 1024.0,
        "tib" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => return None,
    };

    let bytes = (value * multiplier).round();
    if !bytes.is_finite() || bytes < 0.0 || bytes > u64::MAX as f64 {
        return None;
    }
    Some(bytes as u64)
}
