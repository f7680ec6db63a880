use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_shelf"))
}

/// Run the binary isolated from the user's config and environment.
fn run(config_home: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("SHELF_DATA_DIR")
        .env_remove("SHELF_CONFIG")
        .env_remove("SHELF_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("run shelf")
}

#[test]
fn test_help_lists_data_dir() {
    let home = tempdir().expect("tempdir");
    let output = run(home.path(), &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--data-dir"));
}

#[test]
fn test_check_creates_data_dir_and_passes_when_empty() {
    let home = tempdir().expect("tempdir");
    let data = home.path().join("library");
    let output = run(
        home.path(),
        &["--data-dir", data.to_str().unwrap(), "check"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(data.is_dir());
    assert!(String::from_utf8_lossy(&output.stdout).contains("consistent"));
}

#[test]
fn test_check_reports_drift() {
    let home = tempdir().expect("tempdir");
    let data = home.path().join("library");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(
        data.join("books.csv"),
        "ISBN,Title,Author,CopiesTotal,CopiesAvailable\n111,Tiny,Anon,1,0\n",
    )
    .unwrap();

    let output = run(
        home.path(),
        &["--data-dir", data.to_str().unwrap(), "check"],
    );

    assert_eq!(output.status.code(), Some(6));
    assert!(String::from_utf8_lossy(&output.stderr).contains("111"));
}

#[test]
fn test_data_dir_from_config_file() {
    let home = tempdir().expect("tempdir");
    let data = home.path().join("configured");
    let config_dir = home.path().join("shelf");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!("[library]\ndata_dir = {:?}\n", data.to_str().unwrap()),
    )
    .unwrap();

    let output = run(home.path(), &["check"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(data.is_dir());
}

#[test]
fn test_menu_requires_terminal() {
    let home = tempdir().expect("tempdir");
    let data = home.path().join("library");
    let output = run(home.path(), &["--data-dir", data.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("terminal"));
}
