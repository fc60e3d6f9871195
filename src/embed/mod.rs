pub(crate) mod dimensions;
pub(crate) mod sanitize;
pub(crate) mod scaling;
