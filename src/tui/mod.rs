//! Terminal front-end: event loop, input mapping and rendering.

pub mod app;
pub mod events;
pub mod theme;
pub mod views;
pub mod widgets;
