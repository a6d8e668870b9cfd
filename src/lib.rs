pub mod output;
pub mod prompt;
pub mod scales;
pub mod table;
pub mod tuning;
