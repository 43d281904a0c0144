const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// RFC 3986 unreserved characters, the only bytes SigV4 leaves unescaped.
fn is_unreserved(byte: u8) -> bool {
    matches!(byte, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~')
}

pub(crate) fn aws_percent_encode(input: &str) -> String {
    percent_encode(input, false)
}

pub(crate) fn aws_percent_encode_path(input: &str) -> String {
    percent_encode(input, true)
}

fn percent_encode(input: &str, keep_slash: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if is_unreserved(b) || (keep_slash && b == b'/') {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX_UPPER[usize::from(b >> 4)] as char);
            out.push(HEX_UPPER[usize::from(b & 0x0F)] as char);
        }
    }
    out
}

/// Encodes every pair, then sorts by key and value.
pub(crate) fn canonical_query_string(params: &[(String, String)]) -> String {
    let mut items = params
        .iter()
        .map(|(k, v)| (aws_percent_encode(k), aws_percent_encode(v)))
        .collect::<Vec<_>>();

    items.sort();

    items
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
