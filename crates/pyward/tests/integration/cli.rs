use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

const ISSUES: &str = "import os\nresult = eval('1 + 1')\nprint(result)\n";

#[test]
fn test_clean_file() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), "x = 1\nprint(x)\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("test.py")
            .run(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✅ No issues found in test.py

    ----- stderr -----

    ----- args -----
    test.py
    "
    );

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["--verbose", "test.py"])
        .run();
    assert_eq!(output.plain_stdout(), "✅ No issues found in test.py (verbose)\n");

    Ok(())
}

#[test]
fn test_issues_are_listed_by_line() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), ISSUES)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("test.py")
            .run(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ❌ Found 2 issue(s) in test.py
      1. Line 1: Imported name 'os' is never used.
      2. Line 2: Use of `eval()` detected. Use `ast.literal_eval()` for literals, or avoid evaluating dynamic input.

    ----- stderr -----

    ----- args -----
    test.py
    "
    );

    Ok(())
}

#[test]
fn test_category_flags() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), ISSUES)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["-s", "test.py"])
        .run();
    let stdout = output.plain_stdout();
    assert_eq!(output.code(), 1);
    assert!(stdout.contains("Found 1 issue(s)"));
    assert!(stdout.contains("eval()"));

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["--optimize", "test.py"])
        .run();
    let stdout = output.plain_stdout();
    assert!(stdout.contains("Found 1 issue(s)"));
    assert!(stdout.contains("Imported name 'os' is never used."));

    Ok(())
}

#[test]
fn test_optimize_and_security_conflict() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), ISSUES)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["-o", "-s", "test.py"])
        .run();
    assert_eq!(output.code(), 2);
    assert!(output.plain_stderr().contains("cannot be used with"));
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_skip_checks() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), ISSUES)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["--skip-checks", "unused_import, no_eval", "test.py"])
        .run();
    assert_eq!(output.code(), 0);
    assert_eq!(output.plain_stdout(), "✅ No issues found in test.py\n");

    Ok(())
}

#[test]
fn test_unknown_check_alias() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), ISSUES)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .args(["-k", "nope", "test.py"])
            .run(),
        @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    pyward failed
      Cause: Invalid value passed to `--skip-checks`
      Cause: unknown check: `nope`

    ----- args -----
    -k nope test.py
    "
    );

    Ok(())
}

#[test]
fn test_missing_file() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.py"), "x = 1\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .args(["missing.py", "test.py"])
            .run(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✅ No issues found in test.py

    ----- stderr -----
    Error: File 'missing.py' not found

    ----- args -----
    missing.py test.py
    "
    );

    Ok(())
}

#[test]
fn test_syntax_error_is_reported_per_file() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("broken.py"), "def f(:\n    pass\n")?;
    std::fs::write(directory.join("test.py"), "x = 1\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["broken.py", "test.py"])
        .run();
    assert_eq!(output.code(), 1);
    assert!(
        output
            .plain_stderr()
            .starts_with("Error analyzing broken.py: invalid syntax at line")
    );
    assert_eq!(output.plain_stdout(), "✅ No issues found in test.py\n");

    Ok(())
}

#[test]
fn test_directories_are_walked_in_order() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::create_dir_all(directory.join("src/pkg"))?;
    std::fs::create_dir_all(directory.join("src/__pycache__"))?;
    std::fs::write(directory.join("src/b.py"), "x = 1\n")?;
    std::fs::write(directory.join("src/a.py"), "import os\n")?;
    std::fs::write(directory.join("src/pkg/c.py"), "eval(x)\n")?;
    std::fs::write(directory.join("src/README.md"), "import os\n")?;
    std::fs::write(directory.join("src/__pycache__/d.py"), "import os\n")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("src")
            .run(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ❌ Found 1 issue(s) in src/a.py
      1. Line 1: Imported name 'os' is never used.
    ✅ No issues found in src/b.py
    ❌ Found 1 issue(s) in src/pkg/c.py
      1. Line 1: Use of `eval()` detected. Use `ast.literal_eval()` for literals, or avoid evaluating dynamic input.

    ----- stderr -----

    ----- args -----
    src
    "
    );

    Ok(())
}

#[test]
fn test_no_python_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("notes.txt"), "import os\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg(".")
        .run();
    assert_eq!(output.code(), 0);
    assert_eq!(
        output.plain_stdout(),
        "Warning: No Python files found under the given path(s).\n"
    );

    Ok(())
}

#[test]
fn test_paths_are_required() {
    let output = Command::new(binary_path()).run();
    assert_eq!(output.code(), 2);
    assert!(output.plain_stderr().contains("<PATHS>"));
}
