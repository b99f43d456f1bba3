pub(crate) mod yaml_load;
