use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::{ManifestError, Result};
use super::types::*;
use crate::lcid::Lcid;
use crate::utils::{Attributes, local_name};

impl ControlManifest {
    /// Parse the text of a `ControlManifest.Input.xml`.
    ///
    /// Fails on malformed XML, on a document without `<manifest><control>`, and on a document
    /// declaring more than one control. A control without `<resources>` parses with no `resx`
    /// entries.
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = Reader::from_str(text);
        let mut stack: Vec<String> = Vec::new();
        let mut control: Option<ControlDefinition> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ManifestError::xml(reader.buffer_position() as u64, e))?;

            match event {
                Event::Start(start) => {
                    let position = reader.buffer_position() as u64;
                    visit_element(&start, &stack, &mut control, position)?;
                    stack.push(local_name(&start));
                }
                Event::Empty(start) => {
                    let position = reader.buffer_position() as u64;
                    visit_element(&start, &stack, &mut control, position)?;
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = stack.pop() {
            return Err(ManifestError::UnexpectedEof { element });
        }

        let control = control.ok_or(ManifestError::MissingElement { element: "control" })?;
        debug!(
            "Parsed manifest: control `{}` with {} properties and {} resx entries",
            control.display_name_key,
            control.properties.len(),
            control.resx.len()
        );

        Ok(ControlManifest { control })
    }

    /// Locale identifiers with a registered resource entry, in document order.
    ///
    /// Duplicates in the document are reported as-is.
    pub fn locales(&self) -> Vec<Lcid> {
        self.control
            .resx
            .iter()
            .filter_map(|entry| {
                let lcid = entry.lcid();
                if lcid.is_none() {
                    warn!("Ignoring resx entry without a language code: `{}`", entry.path);
                }
                lcid
            })
            .collect()
    }

    pub fn has_resx(&self, path: &str) -> bool {
        self.control.resx.iter().any(|entry| entry.path == path)
    }
}

/// Locale identifiers registered in `manifest`.
pub fn discover_locales(manifest: &ControlManifest) -> Vec<Lcid> {
    manifest.locales()
}

fn parent_is(stack: &[String], expected: &[&str]) -> bool {
    stack.len() >= expected.len()
        && stack[stack.len() - expected.len()..]
            .iter()
            .zip(expected)
            .all(|(a, b)| a == b)
}

fn visit_element(
    start: &BytesStart<'_>,
    stack: &[String],
    control: &mut Option<ControlDefinition>,
    position: u64,
) -> Result<()> {
    let name = local_name(start);

    match name.as_str() {
        "control" if parent_is(stack, &["manifest"]) => {
            if control.is_some() {
                return Err(ManifestError::DuplicateElement { element: "control" });
            }
            let mut attrs = Attributes::read(start).map_err(|e| ManifestError::xml(position, e))?;
            *control = Some(ControlDefinition {
                display_name_key: attrs.take("display-name-key").unwrap_or_default(),
                description_key: attrs.take("description-key").unwrap_or_default(),
                properties: Vec::new(),
                resx: Vec::new(),
            });
        }
        "property" if parent_is(stack, &["manifest", "control"]) => {
            let mut attrs = Attributes::read(start).map_err(|e| ManifestError::xml(position, e))?;
            if let Some(control) = control.as_mut() {
                control.properties.push(PropertyDefinition {
                    display_name_key: attrs.take("display-name-key").unwrap_or_default(),
                    description_key: attrs.take("description-key").unwrap_or_default(),
                    default_value: attrs.take("default-value"),
                    required: attrs.take("required"),
                });
            }
        }
        "resx" if parent_is(stack, &["control", "resources"]) => {
            let mut attrs = Attributes::read(start).map_err(|e| ManifestError::xml(position, e))?;
            if let Some(control) = control.as_mut() {
                control.resx.push(ResxEntry {
                    path: attrs.take("path").unwrap_or_default(),
                });
            }
        }
        _ => {}
    }

    Ok(())
}
