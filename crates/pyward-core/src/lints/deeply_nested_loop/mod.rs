pub(crate) mod deeply_nested_loop;
