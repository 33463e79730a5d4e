pub mod blocks;
pub mod limit;
pub mod parse;
