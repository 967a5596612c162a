/// Strip surrounding whitespace and an optional "0x" prefix.
pub fn clean_hex(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x").unwrap_or(s)
}

pub fn is_private_key_hex(s: &str) -> bool {
    let cleaned = clean_hex(s);
    cleaned.len() == 64 && cleaned.bytes().all(|b| b.is_ascii_hexdigit())
}
