/// The interactive tests are in a separate file,
/// since they use `rexpect`, which internally uses quirky fork semantics to open a pty.
/// They will fail if tried to be executed concurrently any other CLI test.
mod fixtures;

#[cfg(target_os = "windows")]
mod tests {}

#[cfg(not(target_os = "windows"))]
mod tests {
    use super::fixtures::*;

    use rexpect::spawn;
    use std::fs;
    use tempfile::tempdir;

    fn command_line(dir: &std::path::Path, args: &str) -> String {
        format!(
            "{bin} -C {dir} {args}",
            bin = assert_cmd::cargo_bin!("pcfgen").display(),
            dir = dir.display(),
        )
    }

    #[test]
    fn test_it_prompts_for_missing_answers_and_remembers_the_username() {
        let _guard = CLI_TEST_LOCK.lock().unwrap();
        let d = tempdir().unwrap();
        let control_dir = control_folder(d.path());

        let mut p = spawn(&command_line(d.path(), "readme Clipboard"), Some(10000)).unwrap();
        p.exp_regex("GitHub username").unwrap();
        p.send_line("octocat").unwrap();
        p.exp_regex("GitHub repository").unwrap();
        p.send_line("clipboard-pcf").unwrap();
        p.exp_regex("Created").unwrap();
        p.exp_eof().unwrap();

        let readme = fs::read_to_string(control_dir.join("README.md")).unwrap();
        assert!(readme.contains("https://github.com/octocat/clipboard-pcf"));

        let config = fs::read_to_string(d.path().join(".pcfgen.json")).unwrap();
        assert!(config.contains("\"githubUsername\": \"octocat\""), "{config}");
    }

    #[test]
    fn test_it_offers_only_declared_languages() {
        let _guard = CLI_TEST_LOCK.lock().unwrap();
        let d = tempdir().unwrap();
        let control_dir = control_folder(d.path());
        with_english_strings(&control_dir);
        pcfgen::Project::new(d.path(), CONTROL)
            .register_locale(&"1033".parse().unwrap())
            .unwrap();

        let mut p = spawn(
            &command_line(d.path(), "readme Clipboard -u octocat -r clipboard-pcf"),
            Some(10000),
        )
        .unwrap();
        p.exp_regex("Which language would you like to use").unwrap();
        p.exp_regex(r"English \(1033\)").unwrap();
        // Accept the first (and only) choice.
        p.send_line("").unwrap();
        p.exp_regex("Created").unwrap();
        p.exp_eof().unwrap();

        let readme = fs::read_to_string(control_dir.join("README.md")).unwrap();
        assert!(readme.starts_with("# My Control\n"), "{readme}");
    }
}
