/// Cocktail Search - find drinks by the ingredients you have (TUI Edition)
///
/// Core library providing the ingredient query state, navigation history
/// sync, paginated result loading and the terminal front-end.

pub mod config;
pub mod core;
pub mod tui;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
