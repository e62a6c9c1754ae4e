pub mod export;
pub mod reader;
pub mod writer;
