//! A control folder on disk and the generator operations on it.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};

use crate::err::{Result, ScaffoldError};
use crate::lcid::Lcid;
use crate::manifest::{self, ControlManifest, Registration, resx_path};
use crate::readme::ReadmeModel;
use crate::resx::{Translations, resolve_translations};

pub const MANIFEST_FILE_NAME: &str = "ControlManifest.Input.xml";
pub const README_FILE_NAME: &str = "README.md";

/// Resource file written into `strings/` when a language is added.
pub const RESX_TEMPLATE: &str = include_str!("../templates/strings.resx");

/// When registering a language, whether the `.resx` template is written to
/// `strings/<control>.<lcid>.resx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResxCopyPolicy {
    /// Always write the template, replacing an existing file.
    Always,
    /// Only write the template when the file does not exist yet.
    #[default]
    IfMissing,
    /// Never write the file, only declare it in the manifest.
    Never,
}

impl ResxCopyPolicy {
    pub const VARIANTS: &'static [&'static str] = &["always", "if-missing", "never"];
}

impl FromStr for ResxCopyPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "always" => Ok(ResxCopyPolicy::Always),
            "if-missing" => Ok(ResxCopyPolicy::IfMissing),
            "never" => Ok(ResxCopyPolicy::Never),
            other => Err(format!(
                "unknown resx template policy `{other}`, expected one of {}",
                Self::VARIANTS.join(", ")
            )),
        }
    }
}

impl fmt::Display for ResxCopyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResxCopyPolicy::Always => "always",
            ResxCopyPolicy::IfMissing => "if-missing",
            ResxCopyPolicy::Never => "never",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    resx_copy_policy: ResxCopyPolicy,
    resx_template: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            resx_copy_policy: ResxCopyPolicy::default(),
            resx_template: RESX_TEMPLATE.to_owned(),
        }
    }
}

impl GeneratorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resx_copy_policy(mut self, policy: ResxCopyPolicy) -> Self {
        self.resx_copy_policy = policy;
        self
    }

    pub fn resx_template(mut self, template: impl Into<String>) -> Self {
        self.resx_template = template.into();
        self
    }
}

/// What [`Project::register_locale`] changed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleRegistration {
    pub manifest_updated: bool,
    pub resx_written: bool,
}

/// A control folder: `<root>/<control_name>/ControlManifest.Input.xml` and friends.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    control_name: String,
    settings: GeneratorSettings,
}

impl Project {
    pub fn new(root: impl AsRef<Path>, control_name: impl Into<String>) -> Self {
        Project {
            root: root.as_ref().to_path_buf(),
            control_name: control_name.into(),
            settings: GeneratorSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn control_name(&self) -> &str {
        &self.control_name
    }

    pub fn control_dir(&self) -> PathBuf {
        self.root.join(&self.control_name)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.control_dir().join(MANIFEST_FILE_NAME)
    }

    pub fn resx_file_path(&self, lcid: &Lcid) -> PathBuf {
        self.control_dir().join(resx_path(&self.control_name, lcid))
    }

    pub fn readme_path(&self) -> PathBuf {
        self.control_dir().join(README_FILE_NAME)
    }

    fn read_manifest_text(&self) -> Result<String> {
        let path = self.manifest_path();
        debug!("Reading manifest `{}`", path.display());
        fs::read_to_string(&path).map_err(|source| ScaffoldError::ReadManifest { path, source })
    }

    fn invalid_manifest(&self) -> impl FnOnce(manifest::ManifestError) -> ScaffoldError {
        let path = self.manifest_path();
        move |source| ScaffoldError::InvalidManifest { path, source }
    }

    pub fn load_manifest(&self) -> Result<ControlManifest> {
        let text = self.read_manifest_text()?;
        ControlManifest::parse(&text).map_err(self.invalid_manifest())
    }

    /// Languages already declared in the manifest, in document order.
    pub fn used_locales(&self) -> Result<Vec<Lcid>> {
        Ok(manifest::discover_locales(&self.load_manifest()?))
    }

    /// Declare `strings/<control>.<lcid>.resx` in the manifest and write the resource file
    /// according to the configured [`ResxCopyPolicy`].
    ///
    /// The manifest is validated first; nothing is written when it cannot be parsed.
    pub fn register_locale(&self, lcid: &Lcid) -> Result<LocaleRegistration> {
        let manifest_path = self.manifest_path();
        let text = self.read_manifest_text()?;

        let registration = manifest::ensure_locale_registered(&text, &self.control_name, lcid)
            .map_err(self.invalid_manifest())?;

        let manifest_updated = match registration {
            Registration::Updated(updated) => {
                fs::write(&manifest_path, updated).map_err(ScaffoldError::write(&manifest_path))?;
                info!("Updated `{}`", manifest_path.display());
                true
            }
            Registration::AlreadyRegistered => false,
        };

        let resx_written = self.copy_resx_template(lcid)?;

        Ok(LocaleRegistration {
            manifest_updated,
            resx_written,
        })
    }

    fn copy_resx_template(&self, lcid: &Lcid) -> Result<bool> {
        let path = self.resx_file_path(lcid);

        let write = match self.settings.resx_copy_policy {
            ResxCopyPolicy::Always => true,
            ResxCopyPolicy::IfMissing => !path.exists(),
            ResxCopyPolicy::Never => false,
        };

        if !write {
            debug!(
                "Leaving `{}` untouched (policy: {})",
                path.display(),
                self.settings.resx_copy_policy
            );
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ScaffoldError::write(parent))?;
        }
        fs::write(&path, &self.settings.resx_template).map_err(ScaffoldError::write(&path))?;
        info!("Wrote `{}`", path.display());

        Ok(true)
    }

    /// Translations for `lcid`, empty when there is no readable resource file.
    pub fn translations(&self, lcid: &Lcid) -> Translations {
        resolve_translations(&self.control_dir(), &self.control_name, lcid)
    }

    pub fn readme_model(
        &self,
        lcid: &Lcid,
        repository: &str,
        github_username: &str,
    ) -> Result<ReadmeModel> {
        let manifest = self.load_manifest()?;
        let translations = self.translations(lcid);
        Ok(ReadmeModel::from_manifest(
            &manifest,
            &translations,
            repository,
            github_username,
        ))
    }

    /// Render and write `<control>/README.md`; returns the written path.
    pub fn write_readme(
        &self,
        lcid: &Lcid,
        repository: &str,
        github_username: &str,
    ) -> Result<PathBuf> {
        let model = self.readme_model(lcid, repository, github_username)?;
        let path = self.readme_path();

        let readme = model.render().map_err(|source| ScaffoldError::Render {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, readme).map_err(ScaffoldError::write(&path))?;
        info!("Wrote `{}`", path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn policy_parses_from_cli_values() {
        for value in ResxCopyPolicy::VARIANTS {
            let policy: ResxCopyPolicy = value.parse().unwrap();
            assert_eq!(&policy.to_string(), value);
        }
        assert!("sometimes".parse::<ResxCopyPolicy>().is_err());
        assert_eq!(ResxCopyPolicy::default(), ResxCopyPolicy::IfMissing);
    }

    #[test]
    fn builtin_resx_template_is_an_empty_table() {
        let translations = Translations::parse(RESX_TEMPLATE).unwrap();
        assert!(translations.is_empty());
    }

    #[test]
    fn it_lays_out_control_paths() {
        let project = Project::new("/work", "Clipboard");
        let lcid: Lcid = "1033".parse().unwrap();

        assert_eq!(
            project.manifest_path(),
            Path::new("/work/Clipboard/ControlManifest.Input.xml")
        );
        assert_eq!(
            project.resx_file_path(&lcid),
            Path::new("/work/Clipboard/strings/Clipboard.1033.resx")
        );
        assert_eq!(
            project.readme_path(),
            Path::new("/work/Clipboard/README.md")
        );
    }
}
