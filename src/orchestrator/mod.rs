pub(crate) mod engine;
pub(crate) mod sort_run;
