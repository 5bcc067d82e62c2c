pub mod findings;
pub mod index;
