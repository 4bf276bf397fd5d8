//! Language code identifiers and the catalog of languages supported by Dataverse.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A Windows language code identifier, kept as the numeric string it appears as
/// in resource file names (`strings/<control>.<lcid>.resx`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lcid(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{value}` is not a valid language code, expected a number such as 1033")]
pub struct InvalidLcid {
    pub value: String,
}

impl Lcid {
    /// Sentinel for "no locale selected".
    pub const NONE: &'static str = "0";

    pub fn none() -> Self {
        Lcid(Self::NONE.to_owned())
    }

    /// Wraps a path segment without validation. Used by locale discovery, which reports
    /// whatever the manifest declares.
    pub(crate) fn from_segment(segment: &str) -> Self {
        Lcid(segment.to_owned())
    }

    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display name from [`KNOWN_LOCALES`], if this code is listed there.
    pub fn display_name(&self) -> Option<&'static str> {
        KNOWN_LOCALES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
    }
}

impl Default for Lcid {
    fn default() -> Self {
        Lcid::none()
    }
}

impl FromStr for Lcid {
    type Err = InvalidLcid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidLcid {
                value: s.to_owned(),
            });
        }
        Ok(Lcid(s.to_owned()))
    }
}

impl fmt::Display for Lcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Lcid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Languages available for Dataverse / Power Apps, as `(lcid, display name)`.
pub const KNOWN_LOCALES: &[(&str, &str)] = &[
    ("1025", "Arabic"),
    ("1069", "Basque - Basque"),
    ("1026", "Bulgarian - Bulgaria"),
    ("1027", "Catalan - Catalan"),
    ("2052", "Chinese - China"),
    ("3076", "Chinese - Hong Kong SAR"),
    ("1028", "Chinese - Traditional"),
    ("1050", "Croatian - Croatia"),
    ("1029", "Czech - Czech Republic"),
    ("1030", "Danish - Denmark"),
    ("1043", "Dutch - Netherlands"),
    ("1033", "English"),
    ("1061", "Estonian - Estonia"),
    ("1035", "Finnish - Finland"),
    ("1036", "French - France"),
    ("1110", "Galician - Spain"),
    ("1031", "German - Germany"),
    ("1032", "Greek - Greece"),
    ("1037", "Hebrew"),
    ("1081", "Hindi - India"),
    ("1038", "Hungarian - Hungary"),
    ("1057", "Indonesian - Indonesia"),
    ("1040", "Italian - Italy"),
    ("1041", "Japanese - Japan"),
    ("1087", "Kazakh - Kazakhstan"),
    ("1042", "Korean - Korea"),
    ("1062", "Latvian - Latvia"),
    ("1063", "Lithuanian - Lithuania"),
    ("1086", "Malay - Malaysia"),
    ("1044", "Norwegian (Bokmål) - Norway"),
    ("1045", "Polish - Poland"),
    ("1046", "Portuguese - Brazil"),
    ("2070", "Portuguese - Portugal"),
    ("1048", "Romanian - Romania"),
    ("1049", "Russian - Russia"),
    ("3098", "Serbian (Cyrillic) - Serbia"),
    ("2074", "Serbian (Latin) - Serbia"),
    ("1051", "Slovak - Slovakia"),
    ("1060", "Slovenian - Slovenia"),
    ("3082", "Spanish (Traditional Sort) - Spain"),
    ("1053", "Swedish - Sweden"),
    ("1054", "Thai - Thailand"),
    ("1055", "Turkish - Turkey"),
    ("1058", "Ukrainian - Ukraine"),
    ("1066", "Vietnamese - Vietnam"),
];

/// A selectable language, as shown in the language prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChoice {
    pub lcid: Lcid,
    pub label: String,
}

impl fmt::Display for LocaleChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.lcid)
    }
}

/// Every catalog entry, in catalog order.
pub fn all_locale_choices() -> Vec<LocaleChoice> {
    KNOWN_LOCALES
        .iter()
        .map(|(code, name)| LocaleChoice {
            lcid: Lcid::from_segment(code),
            label: (*name).to_owned(),
        })
        .collect()
}

/// Restricts the catalog to the languages in `used`.
///
/// Catalog order wins for known codes; codes missing from the catalog are appended in the order
/// they were found, labelled with the raw code. Each code appears once.
pub fn locale_choices(used: &[Lcid]) -> Vec<LocaleChoice> {
    let mut choices: Vec<LocaleChoice> = all_locale_choices()
        .into_iter()
        .filter(|choice| used.contains(&choice.lcid))
        .collect();

    for lcid in used {
        if lcid.display_name().is_none() && !choices.iter().any(|c| &c.lcid == lcid) {
            choices.push(LocaleChoice {
                lcid: lcid.clone(),
                label: lcid.to_string(),
            });
        }
    }

    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lcids(codes: &[&str]) -> Vec<Lcid> {
        codes.iter().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn it_rejects_non_numeric_codes() {
        assert!("en-US".parse::<Lcid>().is_err());
        assert!("".parse::<Lcid>().is_err());
        assert_eq!("1033".parse::<Lcid>().unwrap().as_str(), "1033");
        assert_eq!(" 1036 ".parse::<Lcid>().unwrap().as_str(), "1036");
    }

    #[test]
    fn default_lcid_is_the_none_sentinel() {
        assert!(Lcid::default().is_none());
        assert_eq!(Lcid::default().as_str(), "0");
    }

    #[test]
    fn choices_follow_catalog_order_and_keep_unknown_codes() {
        let choices = locale_choices(&lcids(&["1036", "9999", "1033", "1036"]));
        let codes: Vec<&str> = choices.iter().map(|c| c.lcid.as_str()).collect();

        assert_eq!(codes, vec!["1033", "1036", "9999"]);
        assert_eq!(choices[0].label, "English");
        assert_eq!(choices[2].label, "9999");
        assert_eq!(choices[1].to_string(), "French - France (1036)");
    }

    #[test]
    fn no_used_locales_means_no_choices() {
        assert!(locale_choices(&[]).is_empty());
    }
}
