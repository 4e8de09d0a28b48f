pub mod logging;

// Query state and its persistence in the navigation history
pub mod ingredients;
pub mod history;
pub mod fields;

// Results: wire types, paging, prefetch and presentation
pub mod models;
pub mod collection;
pub mod prefetch;
pub mod presenter;

// HTTP access to the search endpoint
pub mod error;
pub mod client;

// Everything above wired into one state machine
pub mod session;
