pub(crate) mod unused_import;
