#![deny(unused_must_use)]
#![forbid(unsafe_code)]
//! Scaffolding for PCF (Power Apps component framework) control projects.
//!
//! The generators work on a control folder containing a `ControlManifest.Input.xml`:
//! - [`manifest`] reads the manifest, lists the languages it declares and adds new
//!   `<resx>` declarations without disturbing the rest of the document;
//! - [`resx`] loads the localized strings of a language, falling back to the resource keys;
//! - [`readme`] turns both into the control's `README.md`.
//!
//! [`Project`] ties these to the files on disk.

pub mod config;
pub mod err;
pub mod lcid;
pub mod manifest;
pub mod prerequisites;
pub mod readme;
pub mod resx;
pub mod scaffold;

mod utils;

pub use config::GeneratorConfig;
pub use err::{Result, ScaffoldError};
pub use lcid::{Lcid, LocaleChoice};
pub use manifest::{ControlManifest, Registration, discover_locales, ensure_locale_registered};
pub use prerequisites::Toolchains;
pub use resx::{Translations, lookup};
pub use scaffold::{GeneratorSettings, LocaleRegistration, Project, ResxCopyPolicy};
