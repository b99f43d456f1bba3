pub(crate) mod pickle_load;
