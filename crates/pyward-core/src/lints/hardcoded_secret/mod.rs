pub(crate) mod hardcoded_secret;
