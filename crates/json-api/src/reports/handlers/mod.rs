//! Report Handlers

pub(crate) mod show;
