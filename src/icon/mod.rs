pub(crate) mod endpoints;
pub(crate) mod fallback;
