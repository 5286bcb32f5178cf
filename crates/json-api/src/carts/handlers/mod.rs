//! Cart Handlers

pub(crate) mod add_items;
pub(crate) mod get;
