pub mod parser;
pub mod scanner;
pub mod symbol_table;

use crate::{LexError, ParseError, SymbolError};

/// JackError is the top-level error type for the Jack compiler.
#[derive(thiserror::Error, Debug)]
pub enum JackError {
	/// Internal compiler error, should never happen
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// A lexical error; scanning stops at the first one
	#[error(transparent)]
	LexError(#[from] LexError),
	/// A syntax error raised by the parser
	#[error(transparent)]
	ParseError(#[from] ParseError),
	/// A variable definition or lookup error
	#[error(transparent)]
	SymbolError(#[from] SymbolError),
}
