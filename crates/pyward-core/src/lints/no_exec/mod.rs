pub(crate) mod no_exec;

#[cfg(test)]
mod tests {
    use crate::utils_test::*;

    #[test]
    fn test_no_lint_no_exec() {
        expect_no_lint("execute(code)\n", "no_exec");
        expect_no_lint("cursor.exec(code)\n", "no_exec");
        expect_no_lint("x = 'exec(code)'\n", "no_exec");
    }

    #[test]
    fn test_lint_no_exec() {
        insta::assert_snapshot!(
            format_diagnostics("code = input()\nexec(code)\n", "no_exec"),
            @"Line 2: Use of `exec()` detected. It runs arbitrary code: avoid it, or never pass it untrusted input."
        );
        expect_lint("import builtins\nbuiltins.exec(code)\n", "Use of `exec()` detected.", "no_exec");
        expect_lint("def f(g):\n    exec(g, {})\n", "Use of `exec()` detected.", "no_exec");
    }

    #[test]
    fn test_lint_exec_statement() {
        expect_lint("exec 'x = 1'\n", "Use of `exec()` detected.", "no_exec");
    }
}
