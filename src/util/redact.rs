/// Keeps the first and last four characters of a credential, or hides it
/// completely when it is too short for that to be safe.
pub(crate) fn redact_value(value: &str) -> String {
    let value = value.trim();
    let len = value.chars().count();
    if len <= 8 {
        return "<redacted>".to_string();
    }

    let head = value.chars().take(4).collect::<String>();
    let tail = value.chars().skip(len - 4).collect::<String>();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_values_consistently() {
        assert_eq!(redact_value(""), "<redacted>");
        assert_eq!(redact_value("   "), "<redacted>");
        assert_eq!(redact_value("12345678"), "<redacted>");
        assert_eq!(redact_value("123456789"), "1234...6789");
        assert_eq!(redact_value("AAAAAAAAAAAAAAAAAAAB"), "AAAA...AAAB");
    }
}
