//! Reading and updating `ControlManifest.Input.xml`.
//!
//! - `types`: the typed view of the parts of the manifest the generators use
//! - `parse`: building that view and discovering registered locales
//! - `register`: declaring a new `.resx` file while copying the rest of the document through
//!   untouched

mod error;
mod parse;
mod register;
mod types;

pub use error::{ManifestError, Result};
pub use parse::discover_locales;
pub use register::{Registration, ensure_locale_registered};
pub use types::*;
