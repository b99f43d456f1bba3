pub(crate) mod string_concat_in_loop;
