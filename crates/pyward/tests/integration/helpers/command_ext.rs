use std::fmt::Display;
use std::process::Command;
use std::process::ExitStatus;

pub trait CommandExt {
    /// Executes the command as a child process, waiting for it to finish and collecting all of its output.
    ///
    /// Like [Command::output], but also collects arguments
    ///
    /// The [Output] has a suitable [Display] method for capturing with insta
    fn run(&mut self) -> Output;
}

/// Like [std::process::Output], but augmented with `arguments` and a few extra methods
pub struct Output {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub arguments: String,
}

impl Output {
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(1)
    }

    /// stdout without colors
    pub fn plain_stdout(&self) -> String {
        strip_ansi_escape_codes(&self.stdout).replace('\\', "/")
    }

    /// stderr without colors
    pub fn plain_stderr(&self) -> String {
        strip_ansi_escape_codes(&self.stderr).replace('\\', "/")
    }
}

/// Strip ANSI escape codes from a string
fn strip_ansi_escape_codes(s: &str) -> String {
    use regex::Regex;
    let ansi_regex = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    ansi_regex.replace_all(s, "").to_string()
}

impl CommandExt for Command {
    fn run(&mut self) -> Output {
        // Never depend on the environment of the developer running the tests
        self.env_remove("PYWARD_LOG").env("NO_COLOR", "1");

        let output = self.output().unwrap();

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        let arguments: Vec<String> = self
            .get_args()
            .map(|x| x.to_string_lossy().into_owned())
            .collect();

        let arguments = arguments.join(" ");

        Output { status: output.status, stdout, stderr, arguments }
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "
success: {:?}
exit_code: {}
----- stdout -----
{}
----- stderr -----
{}
----- args -----
{}",
            self.status.success(),
            self.code(),
            self.plain_stdout(),
            self.plain_stderr(),
            self.arguments,
        ))
    }
}
