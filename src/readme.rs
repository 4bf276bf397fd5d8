//! README generation from a parsed manifest and its translations.

use askama::Template;

use crate::manifest::ControlManifest;
use crate::resx::Translations;

/// One row of the properties table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub name: String,
    pub description: String,
    pub default_value: String,
    pub required: String,
}

/// Everything the README template needs, with display texts already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeModel {
    pub control_name: String,
    pub control_description: String,
    pub properties: Vec<PropertyRow>,
    pub repository: String,
    pub github_username: String,
}

impl ReadmeModel {
    /// Resolve every display key of `manifest` through `translations`, falling back to the key.
    pub fn from_manifest(
        manifest: &ControlManifest,
        translations: &Translations,
        repository: impl Into<String>,
        github_username: impl Into<String>,
    ) -> Self {
        let control = &manifest.control;

        let properties = control
            .properties
            .iter()
            .map(|property| PropertyRow {
                name: translations.lookup(&property.display_name_key).to_owned(),
                description: translations.lookup(&property.description_key).to_owned(),
                default_value: property.default_value.clone().unwrap_or_default(),
                required: property.required_or_default().to_owned(),
            })
            .collect();

        ReadmeModel {
            control_name: translations.lookup(&control.display_name_key).to_owned(),
            control_description: translations.lookup(&control.description_key).to_owned(),
            properties,
            repository: repository.into(),
            github_username: github_username.into(),
        }
    }

    /// Render the built-in README template.
    pub fn render(&self) -> askama::Result<String> {
        ReadmeTemplate {
            control_name: &self.control_name,
            control_description: &self.control_description,
            github_username: &self.github_username,
            repository: &self.repository,
            properties: self.properties.iter().map(PropertyRow::to_table_cells).collect(),
        }
        .render()
    }
}

impl PropertyRow {
    fn to_table_cells(&self) -> PropertyRow {
        PropertyRow {
            name: table_cell(&self.name),
            description: table_cell(&self.description),
            default_value: table_cell(&self.default_value),
            required: table_cell(&self.required),
        }
    }
}

#[derive(Template)]
#[template(path = "README.md", escape = "none")]
struct ReadmeTemplate<'a> {
    control_name: &'a str,
    control_description: &'a str,
    github_username: &'a str,
    repository: &'a str,
    properties: Vec<PropertyRow>,
}

/// Markdown table cells cannot contain raw pipes or line breaks.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{ControlDefinition, PropertyDefinition};
    use pretty_assertions::assert_eq;

    fn manifest() -> ControlManifest {
        ControlManifest {
            control: ControlDefinition {
                display_name_key: "ctrl_name".to_owned(),
                description_key: "ctrl_desc".to_owned(),
                properties: vec![
                    PropertyDefinition {
                        display_name_key: "value_name".to_owned(),
                        description_key: "value_desc".to_owned(),
                        required: Some("true".to_owned()),
                        ..Default::default()
                    },
                    PropertyDefinition {
                        display_name_key: "icon_name".to_owned(),
                        description_key: "icon_desc".to_owned(),
                        default_value: Some("copy".to_owned()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
        }
    }

    #[test]
    fn it_falls_back_to_keys_without_translations() {
        let model = ReadmeModel::from_manifest(&manifest(), &Translations::empty(), "repo", "me");

        assert_eq!(model.control_name, "ctrl_name");
        assert_eq!(model.control_description, "ctrl_desc");
        assert_eq!(
            model.properties[1],
            PropertyRow {
                name: "icon_name".to_owned(),
                description: "icon_desc".to_owned(),
                default_value: "copy".to_owned(),
                required: "false".to_owned(),
            }
        );
    }

    #[test]
    fn it_uses_translations_where_available() {
        let translations: Translations = [
            ("ctrl_name".to_owned(), "My Control".to_owned()),
            ("value_desc".to_owned(), "Text | to copy\nfrom the field".to_owned()),
        ]
        .into_iter()
        .collect();

        let model = ReadmeModel::from_manifest(&manifest(), &translations, "repo", "me");
        assert_eq!(model.control_name, "My Control");
        assert_eq!(model.control_description, "ctrl_desc");

        let readme = model.render().unwrap();
        assert!(readme.starts_with("# My Control\n\nctrl_desc\n"), "{readme}");
        assert!(
            readme.contains(
                "## Properties\n\n\
                 | Name | Description | Default | Required |\n\
                 | ---- | ----------- | ------- | -------- |\n\
                 | value_name | Text \\| to copy<br>from the field |  | true |\n\
                 | icon_name | icon_desc | copy | false |\n\
                 \n## Installation"
            ),
            "{readme}"
        );
        assert!(readme.contains("https://github.com/me/repo.git"));
    }

    #[test]
    fn it_says_so_when_there_are_no_properties() {
        let mut manifest = manifest();
        manifest.control.properties.clear();

        let readme = ReadmeModel::from_manifest(&manifest, &Translations::empty(), "repo", "me")
            .render()
            .unwrap();
        assert!(readme.contains(
            "## Properties\n\nThis control has no properties.\n\n## Installation"
        ));
        assert!(!readme.contains("| Name |"));
    }

    #[test]
    fn builtin_template_mentions_the_repository() {
        let readme =
            ReadmeModel::from_manifest(&manifest(), &Translations::empty(), "PCF-Repo", "octocat")
                .render()
                .unwrap();

        assert!(readme.starts_with("# ctrl_name\n"));
        assert!(readme.contains("https://github.com/octocat/PCF-Repo/releases/latest"));
        assert!(!readme.contains("{{"));
        assert!(!readme.contains("{%"));
    }
}
