use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

const ISSUES: &str = "import os\nresult = eval('1 + 1')\nprint(result)\n";

#[test]
fn test_empty_toml_runs_every_check() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), ISSUES)?;
    std::fs::write(directory.join("pyward.toml"), "[lint]\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("test.py")
        .run();
    assert_eq!(output.code(), 1);
    assert!(output.plain_stdout().contains("Found 2 issue(s)"));

    Ok(())
}

#[test]
fn test_toml_skip_checks_and_categories() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), ISSUES)?;

    std::fs::write(
        directory.join("pyward.toml"),
        r#"
[lint]
skip-checks = ["unused_import"]
"#,
    )?;
    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("test.py")
        .run();
    assert!(output.plain_stdout().contains("Found 1 issue(s)"));
    assert!(output.plain_stdout().contains("eval()"));

    // Skip lists from both sources are merged.
    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["-k", "no_eval", "test.py"])
        .run();
    assert_eq!(output.code(), 0);

    std::fs::write(
        directory.join("pyward.toml"),
        r#"
[lint]
security = false
"#,
    )?;
    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("test.py")
        .run();
    assert!(output.plain_stdout().contains("Imported name 'os' is never used."));
    assert!(!output.plain_stdout().contains("eval()"));

    // Category flags on the command line win.
    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["--security", "test.py"])
        .run();
    assert!(output.plain_stdout().contains("eval()"));
    assert!(!output.plain_stdout().contains("Imported name"));

    Ok(())
}

#[test]
fn test_toml_in_parent_directory() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::create_dir_all(directory.join("project"))?;
    std::fs::write(directory.join("project/test.py"), ISSUES)?;
    std::fs::write(
        directory.join("pyward.toml"),
        "[lint]\nskip-checks = [\"unused_import\", \"no_eval\"]\n",
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory.join("project"))
        .arg("test.py")
        .run();
    assert_eq!(output.code(), 0);

    Ok(())
}

#[test]
fn test_toml_unknown_field() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), ISSUES)?;
    std::fs::write(directory.join("pyward.toml"), "[lint]\nselect = [\"no_eval\"]\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("test.py")
        .run();
    assert_eq!(output.code(), 2);
    let stderr = output.plain_stderr();
    assert!(stderr.starts_with("pyward failed\n"));
    assert!(stderr.contains("Failed to parse"));
    assert!(stderr.contains("unknown field `select`"));

    Ok(())
}

#[test]
fn test_toml_unknown_check_alias() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), ISSUES)?;
    std::fs::write(directory.join("pyward.toml"), "[lint]\nskip-checks = [\"nope\"]\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("test.py")
        .run();
    assert_eq!(output.code(), 2);
    let stderr = output.plain_stderr();
    assert!(stderr.contains("Invalid `skip-checks` in"));
    assert!(stderr.contains("Cause: unknown check: `nope`"));

    Ok(())
}
