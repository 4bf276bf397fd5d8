use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use indoc::indoc;
use log::{LevelFilter, debug};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use pcfgen::{GeneratorConfig, Lcid};

mod prompt;
mod readme;
mod resx;

/// Exit status for every failure, including a missing control name and missing toolchains.
const FAILURE_EXIT_CODE: i32 = -1;

/// Options shared by all generators, resolved from the command line and `.pcfgen.json`.
pub struct Session {
    pub directory: PathBuf,
    pub config: GeneratorConfig,
    pub interactive: bool,
    /// Answers changed during this run; written back once the generator succeeds.
    config_changed: bool,
}

impl Session {
    fn from_matches(matches: &ArgMatches, sub: &ArgMatches) -> Result<Self> {
        let directory = matches
            .get_one::<PathBuf>("directory")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));

        let config = GeneratorConfig::load(&directory)?;
        debug!("Generator config: {config:?}");

        Ok(Session {
            directory,
            config,
            interactive: !sub.get_flag("no-interaction"),
            config_changed: false,
        })
    }

    /// The control argument, or the one remembered from a previous run.
    pub fn control_name(&mut self, sub: &ArgMatches) -> Result<String> {
        if let Some(name) = sub.get_one::<String>("control") {
            if self.config.control_name.as_deref() != Some(name.as_str()) {
                self.config.control_name = Some(name.clone());
                self.config_changed = true;
            }
            return Ok(name.clone());
        }

        match &self.config.control_name {
            Some(name) => Ok(name.clone()),
            None => bail!(
                "WARNING\nControl name not found! Please specify the 'control' argument."
            ),
        }
    }

    pub fn lcid_arg(sub: &ArgMatches) -> Option<Lcid> {
        sub.get_one::<Lcid>("lcid").cloned()
    }

    pub fn remember_github_username(&mut self, name: &str) {
        if self.config.github_username.as_deref() != Some(name) {
            self.config.github_username = Some(name.to_owned());
            self.config_changed = true;
        }
    }

    fn save_config(&self) -> Result<()> {
        if !self.config_changed {
            return Ok(());
        }
        self.config
            .save(&self.directory)
            .context("failed to remember generator answers")
    }
}

fn control_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("control")
            .value_name("CONTROL")
            .help("Name of the control folder. Defaults to the last control used in this directory."),
    )
    .arg(
        Arg::new("lcid")
            .long("lcid")
            .short('l')
            .value_name("LCID")
            .value_parser(|s: &str| s.parse::<Lcid>().map_err(|e| e.to_string()))
            .help("Language code, e.g. 1033 for English."),
    )
    .arg(
        Arg::new("no-interaction")
            .long("no-interaction")
            .action(ArgAction::SetTrue)
            .help("Never prompt; use defaults for values not passed on the command line."),
    )
}

fn cli() -> Command {
    Command::new("pcfgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("README and localization scaffolding for PCF controls")
        .long_about(indoc!(
            r#"
            README and localization scaffolding for PCF controls.

            Run it from the folder that contains your control folder:
                <dir>/<CONTROL>/ControlManifest.Input.xml

            The control name and GitHub username are remembered in `.pcfgen.json`.
        "#
        ))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("directory")
                .long("directory")
                .short('C')
                .global(true)
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Run as if started in DIR."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("-v - info, -vv - debug, -vvv - trace"),
        )
        .subcommand(readme::command())
        .subcommand(resx::command())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    if let Err(e) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logging: {e}");
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let Some((name, sub)) = matches.subcommand() else {
        bail!("no command given");
    };
    let mut session = Session::from_matches(matches, sub)?;

    match name {
        readme::NAME => readme::run(&mut session, sub)?,
        resx::NAME => resx::run(&mut session, sub)?,
        other => bail!("unknown command `{other}`"),
    }

    session.save_config()
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("{e:#}");
        exit(FAILURE_EXIT_CODE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }
}
