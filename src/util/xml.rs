use quick_xml::{Reader, events::Event};

use crate::{error::Error, types};

const LIST_BUCKET_RESULT: &str = "ListBucketResult";

pub(crate) fn parse_error_xml(body: &str) -> Option<types::XmlError> {
    if body.trim().is_empty() {
        return None;
    }

    quick_xml::de::from_str::<types::XmlError>(body).ok()
}

/// Parses a `ListBucketResult` document.
///
/// A body that is not XML at all yields [`Error::MalformedXml`]; well-formed
/// XML that does not fit the schema yields [`Error::Parse`] with the element
/// path that failed.
pub fn parse_list_bucket_result(body: &str) -> Result<types::KeyList, Error> {
    let scan = scan_document(body)?;
    if scan.root != LIST_BUCKET_RESULT {
        return Err(Error::parse(
            None,
            format!(
                "expected <{LIST_BUCKET_RESULT}> root element, found <{}>",
                scan.root
            ),
        ));
    }

    let mut de = quick_xml::de::Deserializer::from_str(body);
    let parsed: types::XmlListBucketResult = serde_path_to_error::deserialize(&mut de)
        .map_err(|e| {
            let path = match e.path().to_string().as_str() {
                "." => LIST_BUCKET_RESULT.to_string(),
                inner => format!("{LIST_BUCKET_RESULT}.{inner}"),
            };
            Error::parse(Some(path), e.inner().to_string())
        })?;

    let mut list = types::KeyList::from(parsed);
    scan.raw.restore(&mut list);
    Ok(list)
}

/// Untrimmed text of the elements that name objects.
///
/// The serde deserializer trims text content, but leading and trailing
/// spaces are part of a key.
#[derive(Default)]
struct RawNames {
    keys: Vec<String>,
    prefix: Option<String>,
    marker: Option<String>,
    next_marker: Option<String>,
}

impl RawNames {
    /// Starts a new empty entry if `path` names a tracked element.
    fn open(&mut self, path: &[String]) -> bool {
        let [root, rest @ ..] = path else {
            return false;
        };
        if root != LIST_BUCKET_RESULT {
            return false;
        }
        match rest {
            [contents, key] if contents == "Contents" && key == "Key" => {
                self.keys.push(String::new())
            }
            [name] if name == "Prefix" => self.prefix = Some(String::new()),
            [name] if name == "Marker" => self.marker = Some(String::new()),
            [name] if name == "NextMarker" => self.next_marker = Some(String::new()),
            _ => return false,
        }
        true
    }

    /// The entry most recently opened for an element named like `path`'s last segment.
    fn current(&mut self, path: &[String]) -> Option<&mut String> {
        match path.last().map(String::as_str) {
            Some("Key") => self.keys.last_mut(),
            Some("Prefix") => self.prefix.as_mut(),
            Some("Marker") => self.marker.as_mut(),
            Some("NextMarker") => self.next_marker.as_mut(),
            _ => None,
        }
    }

    fn restore(self, list: &mut types::KeyList) {
        if self.keys.len() == list.keys.len() {
            for (key, raw) in list.keys.iter_mut().zip(self.keys) {
                key.key = raw;
            }
        }
        list.prefix = self.prefix.filter(|v| !v.is_empty());
        list.marker = self.marker.filter(|v| !v.is_empty());
        list.next_marker = self.next_marker.filter(|v| !v.is_empty());
    }
}

struct Scan {
    root: String,
    raw: RawNames,
}

/// Checks `body` is one well-formed element tree, returning its root name and
/// the raw object names it carries.
fn scan_document(body: &str) -> Result<Scan, Error> {
    let mut reader = Reader::from_str(body);
    let mut root = None;
    let mut stack: Vec<String> = Vec::new();
    let mut raw = RawNames::default();
    // Depth of the element whose text is being captured.
    let mut capture: Option<usize> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if root.is_none() {
                    root = Some(name.clone());
                }
                stack.push(name);
                if capture.is_none() && raw.open(&stack) {
                    capture = Some(stack.len());
                    text.clear();
                }
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if root.is_none() {
                    root = Some(name.clone());
                }
                stack.push(name);
                raw.open(&stack);
                stack.pop();
            }
            Ok(Event::Text(e)) if capture.is_some() => {
                let unescaped = e.unescape().map_err(|err| {
                    Error::malformed_xml(
                        format!("invalid text at byte {}", reader.buffer_position()),
                        Some(Box::new(err)),
                    )
                })?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(e)) if capture.is_some() => {
                let decoded = e.decode().map_err(|err| {
                    Error::malformed_xml(
                        format!("invalid CDATA at byte {}", reader.buffer_position()),
                        Some(Box::new(err)),
                    )
                })?;
                text.push_str(&decoded);
            }
            Ok(Event::End(_)) => {
                if capture == Some(stack.len()) {
                    if let Some(entry) = raw.current(&stack) {
                        entry.push_str(&text);
                    }
                    capture = None;
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::malformed_xml(
                    format!("invalid XML at byte {}", reader.buffer_position()),
                    Some(Box::new(e)),
                ));
            }
        }
    }

    if !stack.is_empty() {
        return Err(Error::malformed_xml(
            "unexpected end of document: unclosed element",
            None,
        ));
    }

    let root =
        root.ok_or_else(|| Error::malformed_xml("response body contains no XML element", None))?;
    Ok(Scan { root, raw })
}
