pub mod generate;
pub mod tree;
