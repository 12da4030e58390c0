pub(crate) mod core;
pub(crate) mod deferred;
pub(crate) mod error;
