//! Detection of the external toolchains the generated projects are built with.

use std::env;
use std::fmt;

use log::debug;
use thiserror::Error;

const POWER_APPS_CLI_MARKER: &str = "PowerAppsCLI";
const MSBUILD_MARKER: &str = "MSBuild";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolchain {
    PowerAppsCli,
    MsBuild,
}

impl Toolchain {
    fn install_hint(self) -> &'static str {
        match self {
            Toolchain::PowerAppsCli => "You can download it from: https://aka.ms/PowerAppsCLI",
            Toolchain::MsBuild => {
                "It's usually located at C:\\Users\\<YOUR_USER>\\AppData\\Local\\Microsoft\\PowerAppsCLI\\"
            }
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toolchain::PowerAppsCli => f.write_str("Power Apps CLI"),
            Toolchain::MsBuild => f.write_str("MSBuild"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing prerequisites:\n{}", render_missing(.missing))]
pub struct PrerequisiteError {
    pub missing: Vec<Toolchain>,
}

fn render_missing(missing: &[Toolchain]) -> String {
    missing
        .iter()
        .map(|t| {
            format!(
                "WARNING: {t} not found in your path variable. Please add it to proceed.\n{}",
                t.install_hint()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Toolchains found on a search path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toolchains {
    pub power_apps_cli: bool,
    pub msbuild: bool,
}

impl Toolchains {
    /// Scan a path-list value. Entries are separated by `;` (Windows style) or by the separator
    /// of the current platform.
    pub fn from_path_list(value: &str) -> Self {
        let mut found = Toolchains::default();

        let entries = value
            .split(';')
            .flat_map(|chunk| env::split_paths(chunk).collect::<Vec<_>>());

        for entry in entries {
            let entry = entry.to_string_lossy();
            if entry.contains(POWER_APPS_CLI_MARKER) {
                found.power_apps_cli = true;
            } else if entry.contains(MSBUILD_MARKER) {
                found.msbuild = true;
            }
        }

        debug!("Detected toolchains: {found:?}");
        found
    }

    /// Scan the `PATH` of the current process.
    pub fn from_env() -> Self {
        let path = env::var_os("PATH").unwrap_or_default();
        Self::from_path_list(&path.to_string_lossy())
    }

    /// Fails with every missing toolchain. MSBuild is only checked when `require_msbuild` is set.
    pub fn check(&self, require_msbuild: bool) -> Result<(), PrerequisiteError> {
        let mut missing = Vec::new();

        if require_msbuild && !self.msbuild {
            missing.push(Toolchain::MsBuild);
        }
        if !self.power_apps_cli {
            missing.push(Toolchain::PowerAppsCli);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PrerequisiteError { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WINDOWS_PATH: &str = r"C:\Windows;C:\Users\me\AppData\Local\Microsoft\PowerAppsCLI\;C:\Program Files\Microsoft Visual Studio\2022\BuildTools\MSBuild\Current\Bin";

    #[test]
    fn it_detects_both_toolchains() {
        let found = Toolchains::from_path_list(WINDOWS_PATH);

        assert_eq!(
            found,
            Toolchains {
                power_apps_cli: true,
                msbuild: true
            }
        );
        assert!(found.check(true).is_ok());
    }

    #[test]
    fn it_reports_every_missing_toolchain() {
        let err = Toolchains::from_path_list(r"C:\Windows;C:\tools")
            .check(true)
            .unwrap_err();

        assert_eq!(
            err.missing,
            vec![Toolchain::MsBuild, Toolchain::PowerAppsCli]
        );
        let message = err.to_string();
        assert!(message.contains("MSBuild not found"));
        assert!(message.contains("https://aka.ms/PowerAppsCLI"));
        assert_eq!(
            message.lines().nth(1),
            Some("WARNING: MSBuild not found in your path variable. Please add it to proceed.")
        );
        assert!(message.contains(r"C:\Users\<YOUR_USER>\AppData\Local\Microsoft\PowerAppsCLI\"));
    }

    #[test]
    fn msbuild_is_optional_when_not_required() {
        let found = Toolchains::from_path_list("/usr/bin:/opt/PowerAppsCLI/bin");

        assert!(found.power_apps_cli);
        assert!(!found.msbuild);
        assert!(found.check(false).is_ok());
        assert!(found.check(true).is_err());
    }
}
