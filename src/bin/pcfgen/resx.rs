use anyhow::{Result, bail};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};

use pcfgen::lcid::all_locale_choices;
use pcfgen::{GeneratorSettings, Project, ResxCopyPolicy, Toolchains};

use crate::prompt;
use crate::{Session, control_args};

pub const NAME: &str = "resx";

pub fn command() -> Command {
    control_args(
        Command::new(NAME)
            .about("Add a language to a control: declare its .resx file in the manifest and create it")
            .arg(
                Arg::new("resx-template")
                    .long("resx-template")
                    .value_name("POLICY")
                    .value_parser(PossibleValuesParser::new(
                        ResxCopyPolicy::VARIANTS.iter().copied(),
                    ))
                    .default_value("if-missing")
                    .help("When to write the .resx template: always (replaces translations), if-missing, never."),
            )
            .arg(
                Arg::new("skip-prerequisites")
                    .long("skip-prerequisites")
                    .action(ArgAction::SetTrue)
                    .help("Do not check the PATH for the Power Apps CLI."),
            ),
    )
}

pub fn run(session: &mut Session, matches: &ArgMatches) -> Result<()> {
    if !matches.get_flag("skip-prerequisites") {
        Toolchains::from_env().check(false)?;
        println!("Checking prerequisites OK");
    }

    let control_name = session.control_name(matches)?;

    let lcid = match Session::lcid_arg(matches) {
        Some(lcid) => lcid,
        None if session.interactive => prompt::select_locale(
            "Which language would you like to add?",
            &all_locale_choices(),
        )?,
        None => bail!("a language is required, pass it with --lcid"),
    };

    let policy = match matches.get_one::<String>("resx-template") {
        Some(value) => value.parse::<ResxCopyPolicy>().map_err(anyhow::Error::msg)?,
        None => ResxCopyPolicy::default(),
    };

    let project = Project::new(&session.directory, control_name)
        .with_settings(GeneratorSettings::new().resx_copy_policy(policy));
    let outcome = project.register_locale(&lcid)?;

    let resx_path = project.resx_file_path(&lcid);
    if outcome.manifest_updated {
        println!("Added {} to {}", lcid, project.manifest_path().display());
    } else {
        println!("{} is already declared in the manifest", lcid);
    }
    if outcome.resx_written {
        println!("Created {}", resx_path.display());
    } else {
        println!("Kept {}", resx_path.display());
    }

    Ok(())
}
