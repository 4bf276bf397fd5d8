#![allow(dead_code)]
use std::fs;
use std::path::{Path, PathBuf};

use std::sync::{Mutex, Once};

static LOGGER_INIT: Once = Once::new();

/// Serializes tests that spawn the CLI.
pub static CLI_TEST_LOCK: Mutex<()> = Mutex::new(());

pub const CONTROL: &str = "Clipboard";

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .init();
    });
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn manifest_fixture() -> String {
    fs::read_to_string(fixtures_dir().join("ControlManifest.Input.xml")).unwrap()
}

pub fn english_strings_fixture() -> String {
    fs::read_to_string(fixtures_dir().join("Clipboard.1033.resx")).unwrap()
}

/// Lays out `<root>/Clipboard/ControlManifest.Input.xml` and returns the control folder.
pub fn control_folder(root: &Path) -> PathBuf {
    let dir = root.join(CONTROL);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("ControlManifest.Input.xml"), manifest_fixture()).unwrap();
    dir
}

/// Adds the English strings next to the manifest.
pub fn with_english_strings(control_dir: &Path) {
    let strings = control_dir.join("strings");
    fs::create_dir_all(&strings).unwrap();
    fs::write(strings.join("Clipboard.1033.resx"), english_strings_fixture()).unwrap();
}
