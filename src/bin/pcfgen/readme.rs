use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::info;

use pcfgen::Project;
use pcfgen::lcid::{Lcid, locale_choices};

use crate::prompt;
use crate::{Session, control_args};

pub const NAME: &str = "readme";

const DEFAULT_GITHUB_USERNAME: &str = "DynamicsNinja";
const DEFAULT_REPOSITORY: &str = "PCF-Clipboard-Control";

pub fn command() -> Command {
    control_args(
        Command::new(NAME)
            .about("Generate README.md for a control from its manifest and translations")
            .arg(
                Arg::new("github-username")
                    .long("github-username")
                    .short('u')
                    .value_name("NAME")
                    .help("GitHub username owning the repository."),
            )
            .arg(
                Arg::new("repository")
                    .long("repository")
                    .short('r')
                    .value_name("NAME")
                    .help("GitHub repository name."),
            ),
    )
}

pub fn run(session: &mut Session, matches: &ArgMatches) -> Result<()> {
    let control_name = session.control_name(matches)?;
    let project = Project::new(&session.directory, control_name);

    let used = project
        .used_locales()
        .context("cannot list the languages of the control")?;
    let choices = locale_choices(&used);
    info!("Languages declared in the manifest: {used:?}");

    let github_username = match matches.get_one::<String>("github-username") {
        Some(name) => name.clone(),
        None if session.interactive => {
            let default = session
                .config
                .github_username
                .clone()
                .unwrap_or_else(|| DEFAULT_GITHUB_USERNAME.to_owned());
            let answer = prompt::input("GitHub username", &default)?;
            session.remember_github_username(&answer);
            answer
        }
        None => session
            .config
            .github_username
            .clone()
            .unwrap_or_else(|| DEFAULT_GITHUB_USERNAME.to_owned()),
    };

    let repository = match matches.get_one::<String>("repository") {
        Some(name) => name.clone(),
        None if session.interactive => prompt::input("GitHub repository", DEFAULT_REPOSITORY)?,
        None => DEFAULT_REPOSITORY.to_owned(),
    };

    let lcid = match Session::lcid_arg(matches) {
        Some(lcid) => lcid,
        None if session.interactive && !choices.is_empty() => {
            prompt::select_locale("Which language would you like to use?", &choices)?
        }
        None => Lcid::none(),
    };

    let path = project.write_readme(&lcid, &repository, &github_username)?;
    println!("Created {}", path.display());

    Ok(())
}
