pub(crate) mod post_store;
pub(crate) mod stores;
