// Adapters layer: concrete implementations for files, JSON and the terminal.

pub mod json_export;
pub mod storage;
pub mod terminal;
pub mod tsv;
