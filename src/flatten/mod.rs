pub mod basic;
pub mod factory;
pub mod heuristic;
pub mod smart_list;
pub mod strategy;

pub use factory::FlattenerFactory;
pub use strategy::{squeeze_blanks, FlattenMode, Flattener};
