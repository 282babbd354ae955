//! CLI command implementations.

pub(crate) mod groups;
pub(crate) mod history;
pub(crate) mod url_info;
