use log::{debug, info};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::error::{ManifestError, Result};
use super::types::*;
use crate::lcid::Lcid;
use crate::utils::{is_whitespace, local_name, lossy};

const BYTE_ORDER_MARK: &str = "\u{FEFF}";

/// Outcome of [`ensure_locale_registered`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The manifest already declares the resource file; nothing to write.
    AlreadyRegistered,
    /// The full manifest text with the new `<resx>` entry; the caller persists it.
    Updated(String),
}

/// Make sure the manifest declares `strings/<control_name>.<lcid>.resx`.
///
/// The new entry goes right after the last existing `<resx>`, or becomes the only entry of
/// `<resources>`. Everything else in the document is copied through unchanged, so calling this
/// again on the updated text returns [`Registration::AlreadyRegistered`].
pub fn ensure_locale_registered(
    manifest_text: &str,
    control_name: &str,
    lcid: &Lcid,
) -> Result<Registration> {
    let manifest = ControlManifest::parse(manifest_text)?;
    let path = resx_path(control_name, lcid);

    if manifest.has_resx(&path) {
        debug!("`{path}` is already declared in the manifest");
        return Ok(Registration::AlreadyRegistered);
    }

    let updated = insert_resx_entry(manifest_text, &path, manifest.control.resx.len())?;
    info!("Declared `{path}` in the manifest");

    Ok(Registration::Updated(updated))
}

/// Streams the manifest through a writer, adding `<resx path=.. version=../>` to the
/// `<resources>` element of the control. `existing` is the number of `<resx>` entries already
/// there.
fn insert_resx_entry(text: &str, path: &str, existing: usize) -> Result<String> {
    let mut out = Vec::with_capacity(text.len() + path.len() + 48);
    // The reader skips a byte order mark; it has to be written back by hand.
    let text = match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => {
            out.extend_from_slice(BYTE_ORDER_MARK.as_bytes());
            rest
        }
        None => text,
    };

    let mut reader = Reader::from_str(text);
    let mut rewriter = Rewriter {
        writer: Writer::new(out),
        path,
        existing,
        seen: 0,
        inserted: false,
        stack: Vec::new(),
        last_ws: String::new(),
        pending_ws: None,
        child_ws: None,
    };

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ManifestError::xml(reader.buffer_position() as u64, e))?;
        if let Event::Eof = event {
            break;
        }
        rewriter.visit(event)?;
    }

    if !rewriter.inserted {
        return Err(ManifestError::MissingElement {
            element: "resources",
        });
    }

    Ok(String::from_utf8(rewriter.writer.into_inner())?)
}

struct Rewriter<'p> {
    writer: Writer<Vec<u8>>,
    path: &'p str,
    existing: usize,
    seen: usize,
    inserted: bool,
    stack: Vec<String>,
    /// Most recent whitespace-only text anywhere in the document.
    last_ws: String,
    /// Whitespace between children of `<resources>`, held until we know what follows it.
    pending_ws: Option<String>,
    /// Whitespace that preceded the first child of `<resources>`.
    child_ws: Option<String>,
}

impl Rewriter<'_> {
    fn in_resources(&self) -> bool {
        let depth = self.stack.len();
        !self.inserted
            && depth >= 2
            && self.stack[depth - 2] == "control"
            && self.stack[depth - 1] == "resources"
    }

    fn is_resources(&self, start: &BytesStart<'_>) -> bool {
        !self.inserted
            && local_name(start) == "resources"
            && self.stack.last().map(String::as_str) == Some("control")
    }

    fn visit(&mut self, event: Event<'_>) -> Result<()> {
        match event {
            Event::Text(text) if is_whitespace(&text) => {
                let ws = lossy(&text).into_owned();
                if self.in_resources() {
                    self.flush_pending()?;
                    self.pending_ws = Some(ws.clone());
                } else {
                    self.emit(Event::Text(text))?;
                }
                self.last_ws = ws;
            }
            Event::Empty(start) if self.is_resources(&start) => {
                // `<resources/>`: open it up so it can hold the entry.
                let outer = self.last_ws.clone();
                let inner = if outer.is_empty() {
                    String::new()
                } else {
                    format!("{outer}  ")
                };
                self.emit(Event::Start(start.clone()))?;
                self.emit_ws(&inner)?;
                self.emit_entry()?;
                self.emit_ws(&outer)?;
                self.emit(Event::End(start.to_end()))?;
            }
            Event::Start(start) => {
                let name = local_name(&start);
                let is_resx = name == "resx" && self.in_resources();
                self.before_child()?;
                self.emit(Event::Start(start))?;
                self.stack.push(name);
                if is_resx {
                    self.seen += 1;
                }
            }
            Event::Empty(start) => {
                let is_resx = local_name(&start) == "resx" && self.in_resources();
                let preceding = self.before_child()?;
                self.emit(Event::Empty(start))?;
                if is_resx {
                    self.seen += 1;
                    self.after_resx(preceding)?;
                }
            }
            Event::End(end) => {
                let closes_resources = self.in_resources();
                if closes_resources {
                    let closing = self.pending_ws.take();
                    if self.existing == 0 {
                        let indent = match (&self.child_ws, &closing) {
                            (Some(child), _) => child.clone(),
                            (None, Some(closing)) => format!("{closing}  "),
                            (None, None) => String::new(),
                        };
                        self.emit_ws(&indent)?;
                        self.emit_entry()?;
                    }
                    if let Some(closing) = closing {
                        self.emit_ws(&closing)?;
                    }
                }

                let name = self.stack.pop().unwrap_or_default();
                self.emit(Event::End(end))?;

                // A non-empty `<resx>...</resx>` closes here.
                if name == "resx" && self.in_resources() && self.seen == self.existing {
                    let preceding = self.child_ws.clone();
                    self.after_resx(preceding)?;
                }
            }
            other => {
                self.flush_pending()?;
                self.emit(other)?;
            }
        }

        Ok(())
    }

    /// Writes held-back whitespace ahead of a child element and returns it.
    fn before_child(&mut self) -> Result<Option<String>> {
        let ws = self.pending_ws.take();
        if let Some(ws) = &ws {
            if self.child_ws.is_none() {
                self.child_ws = Some(ws.clone());
            }
            self.emit_ws(ws)?;
        }
        Ok(ws)
    }

    fn after_resx(&mut self, preceding: Option<String>) -> Result<()> {
        if self.seen == self.existing && !self.inserted {
            let indent = preceding.or_else(|| self.child_ws.clone()).unwrap_or_default();
            self.emit_ws(&indent)?;
            self.emit_entry()?;
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        if let Some(ws) = self.pending_ws.take() {
            self.emit_ws(&ws)?;
        }
        Ok(())
    }

    fn emit_entry(&mut self) -> Result<()> {
        let entry = BytesStart::new("resx")
            .with_attributes([("path", self.path), ("version", RESX_ENTRY_VERSION)]);
        self.emit(Event::Empty(entry))?;
        self.inserted = true;
        Ok(())
    }

    fn emit_ws(&mut self, ws: &str) -> Result<()> {
        if ws.is_empty() {
            return Ok(());
        }
        self.emit(Event::Text(BytesText::from_escaped(ws)))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(ManifestError::write)
    }
}
