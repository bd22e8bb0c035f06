pub(crate) mod admin;
pub(crate) mod chat;
pub(crate) mod complete;
pub(crate) mod emotes;
