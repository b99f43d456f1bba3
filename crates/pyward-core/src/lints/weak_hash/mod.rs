pub(crate) mod weak_hash;
