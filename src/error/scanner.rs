/// A lexical error with the line it occurred on.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {type}")]
pub struct LexError {
	line:   usize,
	r#type: LexErrorType,
}

impl LexError {
	pub fn new(line: usize, r#type: LexErrorType) -> Self { Self { line, r#type } }
}

/// Types of lexical errors.
#[derive(Debug)]
pub enum LexErrorType {
	/// End of input before the closing `"` of a string constant.
	UnterminatedString,
	/// End of input before the closing `*/` of a block comment.
	UnterminatedBlockComment,
	/// A character outside the Jack alphabet, in a non-string, non-comment context.
	UnexpectedCharacter(char),
	/// An integer constant outside `0..=32767`.
	IntegerOutOfRange(String),
	/// A word starting with a digit, e.g. `1abc`.
	DigitLeadingWord(String),
}

impl std::fmt::Display for LexErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexErrorType::*;
		match self {
			UnterminatedString => {
				write!(f, "Unterminated string constant")
			}
			UnterminatedBlockComment => {
				write!(f, "Unterminated block comment")
			}
			UnexpectedCharacter(c) => {
				write!(f, "Unexpected character '{c}'")
			}
			IntegerOutOfRange(text) => {
				write!(f, "Integer constant '{text}' is out of the range 0..=32767")
			}
			DigitLeadingWord(word) => {
				write!(f, "'{word}' begins with a digit but is not an integer constant")
			}
		}
	}
}
