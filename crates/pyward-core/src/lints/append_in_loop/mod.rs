pub(crate) mod append_in_loop;
