const ERROR_LOG_MAX_LEN: usize = 320;

/// Flattens provider/HTTP errors to a single bounded line for the operator log.
pub fn compact_error(err: impl std::fmt::Display) -> String {
    compact_error_message(&err.to_string(), ERROR_LOG_MAX_LEN)
}

pub fn compact_error_message(message: &str, max_len: usize) -> String {
    let mut raw = message;
    // JSON-RPC errors echo the whole response body after `text:`.
    if let Some((prefix, _)) = raw.split_once(" text: ") {
        raw = prefix;
    }
    if let Some((prefix, _)) = raw.split_once("Stack backtrace:") {
        raw = prefix;
    }

    let mut compact = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.len() > max_len {
        let mut cut = max_len;
        while !compact.is_char_boundary(cut) {
            cut -= 1;
        }
        compact.truncate(cut);
        compact.push_str("...(truncated)");
    }
    compact
}
