pub(crate) mod range_len;
