//! String formatting utilities.
//!
//! Hex prefix handling for addresses, hashes and signatures, and truncation
//! of long hex values in log fields.

/// Shortens a hex value for log output: `0x1234ab..` for anything longer
/// than ten characters.
pub fn truncate_id(id: &str) -> String {
	match id.get(..10) {
		Some(head) if id.len() > 10 => format!("{}..", head),
		_ => id.to_string(),
	}
}

/// Returns `hex_str` with a `0x` prefix, adding one only when missing.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.starts_with("0x") || hex_str.starts_with("0X") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Returns `hex_str` without its `0x`/`0X` prefix.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}
