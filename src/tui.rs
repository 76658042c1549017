//! Terminal front-end: a menu scene and a heads-up table driven through `HoldemEngine`.

pub mod app;
pub mod controller;
mod ui;
