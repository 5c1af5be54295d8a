mod env;
mod interpreter;

pub use crate::env::Env;
pub use crate::interpreter::{evaluate, Interpreter};
