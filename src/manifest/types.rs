use crate::lcid::Lcid;

/// Version written on `<resx>` entries created by this crate.
pub const RESX_ENTRY_VERSION: &str = "1.0.0";

/// Typed view of a `ControlManifest.Input.xml` document.
///
/// Only the parts the generators read are modelled; everything else stays in the raw text and is
/// left untouched when the manifest is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlManifest {
    pub control: ControlDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlDefinition {
    pub display_name_key: String,
    pub description_key: String,
    /// `<property>` children, in document order.
    pub properties: Vec<PropertyDefinition>,
    /// `<resources>/<resx>` entries, in document order.
    pub resx: Vec<ResxEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyDefinition {
    pub display_name_key: String,
    pub description_key: String,
    pub default_value: Option<String>,
    pub required: Option<String>,
}

impl PropertyDefinition {
    /// `required` attribute as written, `"false"` when absent.
    pub fn required_or_default(&self) -> &str {
        self.required.as_deref().unwrap_or("false")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResxEntry {
    pub path: String,
}

impl ResxEntry {
    /// The language code encoded in `path`: the segment right before the `.resx` extension.
    ///
    /// `strings/Clipboard.1033.resx` yields `1033`. Paths with fewer than two `.`-separated
    /// segments have no such segment.
    pub fn lcid(&self) -> Option<Lcid> {
        let segments: Vec<&str> = self.path.split('.').collect();
        if segments.len() < 2 {
            return None;
        }
        Some(Lcid::from_segment(segments[segments.len() - 2]))
    }
}

/// Relative path of the resource file for `control_name` in `lcid`, as declared in manifests.
pub fn resx_path(control_name: &str, lcid: &Lcid) -> String {
    format!("strings/{control_name}.{lcid}.resx")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> ResxEntry {
        ResxEntry {
            path: path.to_owned(),
        }
    }

    #[test]
    fn it_takes_the_segment_before_the_extension() {
        assert_eq!(
            entry("strings/Clipboard.1033.resx").lcid().unwrap().as_str(),
            "1033"
        );
        // Dots in the control name do not matter.
        assert_eq!(
            entry("strings/My.Fancy.Control.1036.resx")
                .lcid()
                .unwrap()
                .as_str(),
            "1036"
        );
        assert!(entry("strings/noextension").lcid().is_none());
    }

    #[test]
    fn it_builds_the_canonical_path() {
        let lcid: Lcid = "1033".parse().unwrap();
        assert_eq!(resx_path("Clipboard", &lcid), "strings/Clipboard.1033.resx");
    }
}
