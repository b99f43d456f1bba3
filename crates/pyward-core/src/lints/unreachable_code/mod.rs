pub(crate) mod unreachable_code;
