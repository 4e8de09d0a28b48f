//! Session scenario tests over an in-memory history.

mod fetch_round_trip;
mod history_discipline;
mod pagination;
