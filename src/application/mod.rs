//! Application services: the post store, its sync with the remote
//! collection, and the page state built on top of it.

pub mod action;
pub mod app;
pub mod error;
pub mod fetch;
pub mod form;
pub mod repos;
pub mod router;
pub mod search;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
