//! Resource-string tables (`.resx`) and display text lookup.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::lcid::Lcid;
use crate::manifest::resx_path;
use crate::utils::{Attributes, local_name};

/// Localized strings of one control in one language, keyed by resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    strings: HashMap<String, String>,
}

impl Translations {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a `.resx` document: every `<root>/<data name="..."><value>text</value></data>`
    /// becomes one entry. Headers, schema and comments are skipped.
    pub fn parse(text: &str) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_str(text);
        let mut stack: Vec<String> = Vec::new();
        let mut strings = HashMap::new();

        let mut name: Option<String> = None;
        let mut value: Option<String> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let element = local_name(&start);
                    match element.as_str() {
                        "data" if stack.last().map(String::as_str) == Some("root") => {
                            name = Attributes::read(&start)?.take("name");
                        }
                        "value" if name.is_some() && stack.last().map(String::as_str) == Some("data") => {
                            value = Some(String::new());
                        }
                        _ => {}
                    }
                    stack.push(element);
                }
                Event::Empty(start) => {
                    if local_name(&start) == "value"
                        && stack.last().map(String::as_str) == Some("data")
                    {
                        if let Some(name) = &name {
                            strings.insert(name.clone(), String::new());
                        }
                    }
                }
                Event::Text(text) => {
                    if let Some(value) = value.as_mut() {
                        value.push_str(&text.unescape()?);
                    }
                }
                Event::CData(cdata) => {
                    if let Some(value) = value.as_mut() {
                        value.push_str(&String::from_utf8_lossy(&cdata));
                    }
                }
                Event::End(_) => match stack.pop().as_deref() {
                    Some("value") => {
                        if let (Some(name), Some(value)) = (&name, value.take()) {
                            strings.insert(name.clone(), value);
                        }
                    }
                    Some("data") => name = None,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Translations { strings })
    }

    /// Load a `.resx` file. A missing or unreadable file yields an empty table: display text
    /// then falls back to the resource keys.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                info!(
                    "No translations loaded from `{}` ({e}), using resource keys",
                    path.display()
                );
                return Self::empty();
            }
        };

        match Self::parse(&text) {
            Ok(translations) => {
                debug!(
                    "Loaded {} translations from `{}`",
                    translations.len(),
                    path.display()
                );
                translations
            }
            Err(e) => {
                info!(
                    "Failed to parse `{}` ({e}), using resource keys",
                    path.display()
                );
                Self::empty()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// The translation of `key`, or `key` itself when there is none.
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl FromIterator<(String, String)> for Translations {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Translations {
            strings: iter.into_iter().collect(),
        }
    }
}

/// Translations of `control_name` in `lcid`, read from `<control_dir>/strings/`.
///
/// The "no locale" code resolves to an empty table without touching the disk.
pub fn resolve_translations(control_dir: &Path, control_name: &str, lcid: &Lcid) -> Translations {
    if lcid.is_none() {
        debug!("No language selected, using resource keys");
        return Translations::empty();
    }

    Translations::load(control_dir.join(resx_path(control_name, lcid)))
}

/// Free-function form of [`Translations::lookup`].
pub fn lookup<'a>(translations: &'a Translations, key: &'a str) -> &'a str {
    translations.lookup(key)
}
