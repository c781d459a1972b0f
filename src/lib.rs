//! Postline: a terminal front-end for a blog kept in a JSON REST collection.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
