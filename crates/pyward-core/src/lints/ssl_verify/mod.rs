pub(crate) mod ssl_verify;
