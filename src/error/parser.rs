/// A syntax error with line number and type.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {type}")]
pub struct ParseError {
	/// The line number where the error occurred.
	line:   usize,
	/// The type of syntax error.
	r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(line: usize, r#type: ParseErrorType) -> Self { Self { line, r#type } }
}

/// Types of syntax errors. Each carries the offending token's spelling
/// alongside what the parser expected at that point.
#[derive(Debug)]
pub enum ParseErrorType {
	/// The token stream ended in the middle of a construct.
	UnexpectedEnd,
	/// A specific symbol was required.
	ExpectedSymbol { expected: char, found: String },
	/// A specific keyword was required.
	ExpectedKeyword { expected: &'static str, found: String },
	/// An identifier was required, e.g. a class or variable name.
	ExpectedIdentifier { found: String },
	/// A type name was required: `int`, `char`, `boolean` or a class name.
	ExpectedType { found: String },
	/// An expression term was required.
	ExpectedTerm { found: String },
	/// Tokens remained after the closing `}` of the class.
	TrailingTokens { found: String },
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			UnexpectedEnd => write!(f, "Unexpected end of input."),
			ExpectedSymbol { expected, found } => write!(f, "Expect '{expected}', found {found}."),
			ExpectedKeyword { expected, found } => write!(f, "Expect '{expected}', found {found}."),
			ExpectedIdentifier { found } => write!(f, "Expect an identifier, found {found}."),
			ExpectedType { found } => write!(f, "Expect a type name, found {found}."),
			ExpectedTerm { found } => write!(f, "Expect an expression term, found {found}."),
			TrailingTokens { found } => write!(f, "Expect end of input after the class, found {found}."),
		}
	}
}
