// Optimization
pub(crate) mod append_in_loop;
pub(crate) mod deeply_nested_loop;
pub(crate) mod range_len;
pub(crate) mod string_concat_in_loop;
pub(crate) mod unreachable_code;
pub(crate) mod unused_import;
pub(crate) mod unused_variable;

// Security
pub(crate) mod hardcoded_secret;
pub(crate) mod no_eval;
pub(crate) mod no_exec;
pub(crate) mod pickle_load;
pub(crate) mod ssl_verify;
pub(crate) mod subprocess_shell;
pub(crate) mod weak_hash;
pub(crate) mod yaml_load;
