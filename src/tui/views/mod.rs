pub mod fields;
pub mod results;
