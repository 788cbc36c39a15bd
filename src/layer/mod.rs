pub mod filter;
pub mod plan;
pub mod style;
