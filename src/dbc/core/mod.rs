pub(crate) mod attributes;
pub(crate) mod bo_;
pub(crate) mod bu_;
pub(crate) mod sg_;
pub(crate) mod strings;
