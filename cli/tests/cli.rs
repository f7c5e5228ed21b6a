use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const TS_SOURCE: &str = "// @ts-ignore keep me\nconst a = 1; // drop me\nconst url = \"http://x\";\n";

fn commenter() -> Command {
    let mut cmd = Command::cargo_bin("commenter").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

#[test]
fn dry_run_reports_without_writing() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("app.ts");
    file.write_str(TS_SOURCE).unwrap();

    commenter()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments removed: 2"))
        .stdout(predicate::str::is_match(r"Line 2: .*// drop me").unwrap())
        .stdout(predicate::str::contains("Run with --write"));

    file.assert(TS_SOURCE);
}

#[test]
fn write_rewrites_the_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("app.ts");
    file.write_str(TS_SOURCE).unwrap();

    commenter()
        .arg("--write")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("File updated successfully!"));

    file.assert("const a = 1;\nconst url = \"http://x\";\n");
}

#[test]
fn ignore_pattern_keeps_matching_comments() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("app.ts");
    file.write_str(TS_SOURCE).unwrap();

    commenter()
        .args(["-w", "-i", "@ts-ignore"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments removed: 1"));

    file.assert("// @ts-ignore keep me\nconst a = 1;\nconst url = \"http://x\";\n");
}

#[test]
fn scanner_only_mode_gives_the_same_result() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("app.ts");
    file.write_str(TS_SOURCE).unwrap();

    commenter()
        .env("COMMENTER_DISABLE_TREESITTER", "1")
        .arg("-w")
        .arg(file.path())
        .assert()
        .success();

    file.assert("const a = 1;\nconst url = \"http://x\";\n");
}

#[test]
fn directory_run_prints_batch_summary() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("a.go")
        .write_str("package a\n// one\nvar x = 1\n")
        .unwrap();
    dir.child("q.sql")
        .write_str("SELECT 1; -- two\n")
        .unwrap();
    dir.child("README.md").write_str("# readme\n").unwrap();

    commenter()
        .args(["-w", "--no-confirm"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed: 2"))
        .stdout(predicate::str::contains("Total comments removed: 2"))
        .stdout(predicate::str::contains("Files written successfully: 2"));

    dir.child("a.go").assert("package a\nvar x = 1\n");
    dir.child("q.sql").assert("SELECT 1;\n");
    dir.child("README.md").assert("# readme\n");
}

#[test]
fn config_file_supplies_defaults() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("app.ts");
    file.write_str(TS_SOURCE).unwrap();
    let config = dir.child("commenter.config.json");
    config
        .write_str(r#"{"write": true, "ignorePatterns": ["@ts-ignore"]}"#)
        .unwrap();

    commenter()
        .arg("--config")
        .arg(config.path())
        .arg(file.path())
        .assert()
        .success();

    file.assert("// @ts-ignore keep me\nconst a = 1;\nconst url = \"http://x\";\n");
}

#[test]
fn unsupported_file_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("notes.txt");
    file.write_str("hello\n").unwrap();

    commenter()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
fn unreadable_input_sets_exit_code() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("bad.go");
    file.write_binary(b"package main // \xff\n").unwrap();

    commenter()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.go"));
}

#[test]
fn completion_script_is_generated() {
    Command::cargo_bin("commenter")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commenter"));
}
