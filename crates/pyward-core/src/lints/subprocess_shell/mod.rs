pub(crate) mod subprocess_shell;
