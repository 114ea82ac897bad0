//! URL building utilities for backend resources.

use crate::config::endpoints;

/// Percent-encode a string the way `encodeURIComponent` does.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`) are kept; every
/// other UTF-8 byte becomes `%XX`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// URL serving the raw bytes of a file at `full_path`.
pub fn file_url(full_path: &str) -> String {
    format!("{}{}", endpoints::FILE, encode_uri_component(full_path))
}
