//! End-to-end tests for the `st` binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `st` isolated from the real home directory and config files
fn st(home: &TempDir, workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("st").expect("binary builds");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("NO_COLOR", "1")
        .arg("--workdir")
        .arg(workdir.path());
    cmd
}

#[test]
fn test_cli_write_list_read() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    st(&home, &work)
        .args(["write", "notes/todo.txt", "ship it"])
        .assert()
        .success()
        .stdout("Successfully wrote to \"notes/todo.txt\" (7 characters written)\n");

    st(&home, &work)
        .args(["list", "notes"])
        .assert()
        .success()
        .stdout("- todo.txt: file_size=7 bytes, is_dir=false\n");

    st(&home, &work)
        .args(["read", "notes/todo.txt"])
        .assert()
        .success()
        .stdout("ship it\n");
}

#[test]
fn test_cli_rejection_exits_nonzero() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    st(&home, &work)
        .args(["read", "../../etc/passwd"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("outside the permitted working directory"));
}

#[test]
fn test_cli_run_with_config() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(work.path().join("hello.sh"), "echo \"hi $1\"\nexit 3\n").unwrap();

    let config = home.path().join("st.yml");
    fs::write(
        &config,
        "tools:\n  script:\n    extension: sh\n    interpreter: sh\n    timeout-ms: 5000\n",
    )
    .unwrap();

    st(&home, &work)
        .arg("--config")
        .arg(&config)
        .args(["run", "hello.sh", "there"])
        .assert()
        .success()
        .stdout("STDOUT:\nhi there\n\nProcess exited with code 3\n");
}

#[test]
fn test_cli_call_by_name() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(work.path().join("a.txt"), "abcdef").unwrap();

    let config = home.path().join("st.yml");
    fs::write(&config, "tools:\n  max-chars: 3\n").unwrap();

    st(&home, &work)
        .arg("-c")
        .arg(&config)
        .args(["call", "get_file_content", r#"{"file_path": "a.txt"}"#])
        .assert()
        .success()
        .stdout("abc[...File \"a.txt\" truncated at 3 characters]\n");
}

#[test]
fn test_cli_call_unknown_tool() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    st(&home, &work)
        .args(["call", "rm_rf"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown tool: rm_rf"));
}

#[test]
fn test_cli_tools_prints_definitions() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    let output = st(&home, &work).arg("tools").output().unwrap();
    assert!(output.status.success());

    let defs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = defs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["get_file_content", "get_files_info", "run_python_file", "write_file"]
    );
}
