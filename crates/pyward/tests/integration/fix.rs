use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

#[test]
fn test_fix_writes_the_file_back() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(
        directory.join("test.py"),
        "import os\nimport yaml\n\ndata = yaml.load(open('config.yml'))\nprint(data)\n",
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .args(["--fix", "test.py"])
            .run(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    🔧 Applied 2 fix(es) to test.py
      - import os deleted
      - yaml.load() replaced with yaml.safe_load() at line 4
    ✅ No issues found in test.py

    ----- stderr -----

    ----- args -----
    --fix test.py
    "
    );

    assert_eq!(
        std::fs::read_to_string(directory.join("test.py"))?,
        "import yaml\n\ndata = yaml.safe_load(open('config.yml'))\nprint(data)\n"
    );

    Ok(())
}

#[test]
fn test_fix_reports_remaining_issues() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(
        directory.join("test.py"),
        "import sys\n\ndef f(x):\n    return eval(x)\n    print(x)\n",
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["-f", "test.py"])
        .run();
    assert_eq!(output.code(), 1);
    assert_eq!(
        output.plain_stdout(),
        "\
🔧 Applied 2 fix(es) to test.py
  - import sys deleted
  - Removed unreachable code at line 5
❌ Found 1 issue(s) in test.py
  1. Line 3: Use of `eval()` detected. Use `ast.literal_eval()` for literals, or avoid evaluating dynamic input.
"
    );
    assert_eq!(
        std::fs::read_to_string(directory.join("test.py"))?,
        "\ndef f(x):\n    return eval(x)\n"
    );

    Ok(())
}

#[test]
fn test_fix_leaves_clean_files_alone() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    // No trailing newline: a rewrite would be visible.
    let contents = "import os\nprint(os.sep)";
    std::fs::write(directory.join("test.py"), contents)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["--fix", "test.py"])
        .run();
    assert_eq!(output.code(), 0);
    assert_eq!(output.plain_stdout(), "✅ No issues found in test.py\n");
    assert_eq!(std::fs::read_to_string(directory.join("test.py"))?, contents);

    Ok(())
}

#[test]
fn test_fix_respects_skipped_checks() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    let contents = "import os\n";
    std::fs::write(directory.join("test.py"), contents)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["--fix", "--security", "test.py"])
        .run();
    assert_eq!(output.code(), 0);
    assert_eq!(std::fs::read_to_string(directory.join("test.py"))?, contents);

    Ok(())
}

#[test]
fn test_fix_does_not_touch_unparsable_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    let contents = "import os\ndef f(:\n";
    std::fs::write(directory.join("test.py"), contents)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .args(["--fix", "test.py"])
        .run();
    assert_eq!(output.code(), 1);
    assert!(output.plain_stderr().contains("Error analyzing test.py: invalid syntax"));
    assert_eq!(std::fs::read_to_string(directory.join("test.py"))?, contents);

    Ok(())
}
