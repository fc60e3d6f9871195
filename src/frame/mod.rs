pub(crate) mod geometry;
pub(crate) mod spec;
pub(crate) mod style;
