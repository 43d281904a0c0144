use http::Method;

use crate::{
    error::Result,
    request::{Body, CannedAcl, ListQuery, Request, RequestDescriptor},
    types::{HeaderList, KeyList, ObjectWithHeaders, RawResponse},
    util,
};

/// Path-style object path, `/{bucket}/{key}`. A leading `/` on `key` is dropped.
pub fn object_path(bucket: &str, key: &str) -> String {
    format!("/{bucket}/{}", key.trim_start_matches('/'))
}

fn bucket_path(bucket: &str) -> String {
    format!("/{bucket}/")
}

/// Lists the keys of `bucket` (ListObjects v1).
pub fn list_keys(bucket: &str, query: &[ListQuery]) -> Request<KeyList> {
    Request::new(
        RequestDescriptor::new(Method::GET, bucket_path(bucket)),
        parse_key_list,
    )
    .add_query(query.iter().map(ListQuery::to_pair))
}

/// Fetches an object as text.
pub fn get_object(bucket: &str, key: &str) -> Request<String> {
    Request::new(
        RequestDescriptor::new(Method::GET, object_path(bucket, key)),
        body_text,
    )
}

/// Fetches an object as text, keeping the response headers.
pub fn get_object_with_headers(bucket: &str, key: &str) -> Request<ObjectWithHeaders> {
    Request::new(
        RequestDescriptor::new(Method::GET, object_path(bucket, key)),
        body_with_headers,
    )
}

/// Returns only the response headers of an object.
pub fn head_object(bucket: &str, key: &str) -> Request<HeaderList> {
    Request::new(
        RequestDescriptor::new(Method::HEAD, object_path(bucket, key)),
        headers_only,
    )
}

/// Uploads `body`. Its mime type is sent as `content-type`.
pub fn put_object(bucket: &str, key: &str, body: Body) -> Request<()> {
    let content_type = body.mime().map(|mime| ("content-type", mime.to_string()));
    Request::new(
        RequestDescriptor::new(Method::PUT, object_path(bucket, key)).with_body(body),
        discard,
    )
    .add_headers(content_type)
}

/// [`put_object`] with the `public-read` canned ACL.
pub fn put_public_object(bucket: &str, key: &str, body: Body) -> Request<()> {
    put_object(bucket, key, body).with_acl(CannedAcl::PublicRead)
}

pub fn delete_object(bucket: &str, key: &str) -> Request<()> {
    Request::new(
        RequestDescriptor::new(Method::DELETE, object_path(bucket, key)),
        discard,
    )
}

fn parse_key_list(resp: RawResponse) -> Result<KeyList> {
    let text = resp.text()?;
    util::xml::parse_list_bucket_result(&text)
}

fn body_text(resp: RawResponse) -> Result<String> {
    resp.text()
}

fn body_with_headers(resp: RawResponse) -> Result<ObjectWithHeaders> {
    let body = resp.text()?;
    Ok(ObjectWithHeaders {
        body,
        headers: resp.headers,
    })
}

fn headers_only(resp: RawResponse) -> Result<HeaderList> {
    Ok(resp.headers)
}

fn discard(_: RawResponse) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    fn header_values<'a>(req: &'a Request<()>, name: &str) -> Vec<&'a str> {
        req.descriptor()
            .headers()
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn object_path_is_path_style() {
        assert_eq!(object_path("b1", "a/b.txt"), "/b1/a/b.txt");
        assert_eq!(object_path("b1", "/a.txt"), "/b1/a.txt");
    }

    #[test]
    fn list_keys_maps_query_names() {
        let req = list_keys(
            "b1",
            &[
                ListQuery::Prefix("photos/".into()),
                ListQuery::MaxKeys(100),
                ListQuery::Other("encoding-type".into(), "url".into()),
            ],
        );
        let d = req.descriptor();
        assert_eq!(d.method(), Method::GET);
        assert_eq!(d.path(), "/b1/");
        assert_eq!(
            d.query(),
            [
                ("prefix".to_string(), "photos/".to_string()),
                ("max-keys".to_string(), "100".to_string()),
                ("encoding-type".to_string(), "url".to_string()),
            ]
        );
        assert!(d.body().is_empty());
    }

    #[test]
    fn put_public_html_object_sets_acl_and_content_type_once() {
        let req = put_public_object("b1", "k.txt", Body::html("<p>x</p>"));
        assert_eq!(req.descriptor().method(), Method::PUT);
        assert_eq!(req.descriptor().path(), "/b1/k.txt");
        assert_eq!(header_values(&req, "x-amz-acl"), ["public-read"]);
        assert_eq!(header_values(&req, "content-type"), ["text/html"]);
        assert_eq!(req.descriptor().body().as_bytes(), b"<p>x</p>");
    }

    #[test]
    fn put_without_body_sends_no_content_type() {
        let req = put_object("b1", "empty", Body::empty());
        assert!(header_values(&req, "content-type").is_empty());
    }

    #[test]
    fn methods_match_operations() {
        assert_eq!(get_object("b", "k").descriptor().method(), Method::GET);
        assert_eq!(
            get_object_with_headers("b", "k").descriptor().method(),
            Method::GET
        );
        assert_eq!(head_object("b", "k").descriptor().method(), Method::HEAD);
        assert_eq!(delete_object("b", "k").descriptor().method(), Method::DELETE);
    }

    #[test]
    fn transforms_shape_the_response() {
        let headers = vec![("etag".to_string(), "\"abc\"".to_string())];
        let resp = RawResponse::new(StatusCode::OK, headers.clone(), "hello");

        let text = (get_object("b", "k").transform())(resp.clone()).unwrap();
        assert_eq!(text, "hello");

        let with_headers = (get_object_with_headers("b", "k").transform())(resp.clone()).unwrap();
        assert_eq!(with_headers.body, "hello");
        assert_eq!(with_headers.headers, headers);

        let head = (head_object("b", "k").transform())(resp.clone()).unwrap();
        assert_eq!(head, headers);

        (delete_object("b", "k").transform())(resp).unwrap();
    }

    #[test]
    fn list_transform_rejects_non_xml() {
        let resp = RawResponse::new(StatusCode::OK, Vec::new(), "not xml at all");
        let err = (list_keys("b", &[]).transform())(resp).unwrap_err();
        assert_eq!(err.phase(), crate::Phase::Xml);
    }
}
