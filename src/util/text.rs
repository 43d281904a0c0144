/// Cuts `body` to at most `max_len` bytes on a char boundary, marking the cut.
pub(crate) fn truncate_snippet(body: &str, max_len: usize) -> String {
    if body.len() <= max_len {
        return body.to_string();
    }

    let mut cut = max_len;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_ascii_without_panic() {
        let body = "a".repeat(10);
        assert_eq!(truncate_snippet(&body, 10), body);
        assert_eq!(truncate_snippet(&body, 5), "aaaaa...");
    }

    #[test]
    fn truncates_utf8_safely() {
        let body = "你好，世界".repeat(10);
        let out = truncate_snippet(&body, 5);
        assert_eq!(out, "你...");
    }
}
