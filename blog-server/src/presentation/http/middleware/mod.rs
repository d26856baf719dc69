pub(crate) mod cors;
pub(crate) mod limit;
pub(crate) mod trace;
