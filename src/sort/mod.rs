pub(crate) mod bubble;
