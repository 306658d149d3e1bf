//! The core engine: expression tree, datum reader, special forms, list
//! toolkit, change enumerator, and the `let` rewriter.

pub mod analyze;
pub mod ast;
pub mod builtins;
pub mod error;
pub mod parser;
pub mod special_forms;
