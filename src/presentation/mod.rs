//! Text views for every page.

pub mod views;
