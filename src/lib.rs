pub mod args;
pub mod book;
pub mod cli;
pub mod config;
pub mod import;
pub mod ir;
pub mod operations;
pub mod terminal;
pub mod validators;
