pub mod parser;
mod readline;
mod shell;

pub use shell::{describe, Shell};
