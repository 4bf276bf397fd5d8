use std::borrow::Cow;

use quick_xml::events::BytesStart;

/// Attributes of an element with their values unescaped, in document order.
#[derive(Debug)]
pub(crate) struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub(crate) fn read(start: &BytesStart<'_>) -> Result<Self, quick_xml::Error> {
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attrs.push((key, value));
        }
        Ok(Attributes(attrs))
    }

    pub(crate) fn take(&mut self, key: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }
}

/// Element name without namespace prefix.
pub(crate) fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

pub(crate) fn is_whitespace(text: &[u8]) -> bool {
    text.iter().all(|b| b.is_ascii_whitespace())
}

pub(crate) fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
