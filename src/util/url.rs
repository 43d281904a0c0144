use url::Url;

use crate::error::Error;

pub(crate) struct ResolvedUrl {
    pub(crate) url: Url,
    pub(crate) canonical_uri: String,
    pub(crate) canonical_query_string: String,
}

/// Joins a path-style request path and query onto `base_url`.
///
/// The path is percent-encoded once, keeping `/` separators, and the same
/// encoding is used for the wire URL and the canonical URI.
pub(crate) fn resolve_url(
    base_url: &Url,
    path: &str,
    query_params: &[(String, String)],
) -> Result<ResolvedUrl, Error> {
    if base_url.host_str().is_none() {
        return Err(Error::invalid_config("endpoint must include host"));
    }

    let mut url = base_url.clone();

    let canonical_query_string = crate::util::encode::canonical_query_string(query_params);
    if canonical_query_string.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&canonical_query_string));
    }

    let raw_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    let canonical_uri = crate::util::encode::aws_percent_encode_path(&raw_path);
    url.set_path(&canonical_uri);

    // `url` resolves `.` and `..` segments (escaped or not); the request
    // would then reach a different resource than the one signed.
    if url.path() != canonical_uri {
        return Err(Error::invalid_config(format!(
            "path `{raw_path}` contains `.` or `..` segments and cannot be sent unchanged"
        )));
    }

    Ok(ResolvedUrl {
        url,
        canonical_uri,
        canonical_query_string,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_path_style_url_and_does_not_double_encode() {
        let base = Url::parse("https://nyc3.digitaloceanspaces.com").unwrap();
        let resolved = resolve_url(&base, "/my-bucket/a+b", &[]).unwrap();

        assert_eq!(resolved.canonical_uri, "/my-bucket/a%2Bb");
        assert_eq!(
            resolved.url.as_str(),
            "https://nyc3.digitaloceanspaces.com/my-bucket/a%2Bb"
        );
    }

    #[test]
    fn wire_path_matches_canonical_uri_for_dotted_names() {
        let base = Url::parse("https://nyc3.digitaloceanspaces.com").unwrap();
        for path in ["/b1/.hidden", "/b1/a..b/c.", "/b1/.../x", "/b1/a//b"] {
            let resolved = resolve_url(&base, path, &[]).unwrap();
            assert_eq!(resolved.url.path(), resolved.canonical_uri, "{path}");
        }
    }

    #[test]
    fn dot_segments_are_rejected_instead_of_normalized() {
        let base = Url::parse("https://nyc3.digitaloceanspaces.com").unwrap();
        for path in [
            "/b1/a/../secret.txt",
            "/b1/../other-bucket/x",
            "/b1/./k",
            "/b1/a/..",
        ] {
            let err = resolve_url(&base, path, &[]).err().unwrap();
            assert!(matches!(err, Error::InvalidConfig { .. }), "{path}");
        }
    }

    #[test]
    fn keeps_trailing_slash_of_bucket_listing() {
        let base = Url::parse("https://s3.amazonaws.com").unwrap();
        let resolved = resolve_url(&base, "/b1/", &[]).unwrap();
        assert_eq!(resolved.canonical_uri, "/b1/");
        assert_eq!(resolved.url.query(), None);
    }

    #[test]
    fn path_encoding_preserves_slash_in_key() {
        let base = Url::parse("https://example.com").unwrap();
        let resolved = resolve_url(&base, "my-bucket/a b/c", &[]).unwrap();
        assert_eq!(resolved.canonical_uri, "/my-bucket/a%20b/c");
    }

    #[test]
    fn query_params_are_canonicalized_and_applied_to_url() {
        let base = Url::parse("https://example.com").unwrap();
        let resolved = resolve_url(
            &base,
            "/my-bucket/",
            &[
                ("prefix".to_string(), "a b".to_string()),
                ("max-keys".to_string(), "100".to_string()),
                ("prefix".to_string(), "a".to_string()),
            ],
        )
        .unwrap();

        assert_eq!(
            resolved.canonical_query_string,
            "max-keys=100&prefix=a&prefix=a%20b"
        );
        assert_eq!(
            resolved.url.query().unwrap_or(""),
            "max-keys=100&prefix=a&prefix=a%20b"
        );
    }
}
