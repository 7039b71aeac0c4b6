//! Chat command model: tokenizing, argument conversion, and suggestions.

pub mod args;
pub mod command;
pub mod convert;
pub mod suggest;

pub use args::{Policy, tokenize};
pub use command::Command;
pub use convert::{Arg, Args, ConvertError, Converter, Param, convert_args};
pub use suggest::close_matches;
