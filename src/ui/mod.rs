pub mod actions;
pub mod app;
pub mod grid;
pub mod toolbar;
