use crate::{error::parser::{ParseError, ParseErrorType}, scanner::{Token, TokenType}};

/// A bounded cursor over the scanned token stream.
///
/// Jack needs at most two tokens of context: `peek_second` settles the one
/// ambiguous spot in the grammar, an identifier that may open a variable
/// reference, an array access or a subroutine call.
pub(crate) struct TokenCursor<'a> {
	tokens: Vec<Token<'a>>,
	cursor: usize,
}

impl<'a> TokenCursor<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self { Self { tokens, cursor: 0 } }

	/// The current token, without advancing.
	pub fn peek(&self) -> Result<&Token<'a>, ParseError> {
		self.tokens.get(self.cursor).ok_or_else(|| self.end_of_input())
	}

	/// The token one past the current one.
	pub fn peek_second(&self) -> Result<&Token<'a>, ParseError> {
		self.tokens.get(self.cursor + 1).ok_or_else(|| self.end_of_input())
	}

	/// Returns the current token and moves past it.
	pub fn advance(&mut self) -> Result<Token<'a>, ParseError> {
		let token = self.tokens.get(self.cursor).copied().ok_or_else(|| self.end_of_input())?;
		self.cursor += 1;
		Ok(token)
	}

	/// Whether any tokens besides the end marker remain.
	pub fn more(&self) -> bool {
		self.tokens.get(self.cursor).is_some_and(|t| t.r#type != TokenType::Eof)
	}

	fn end_of_input(&self) -> ParseError {
		let line = self.tokens.last().map_or(1, |t| t.line);
		ParseError::new(line, ParseErrorType::UnexpectedEnd)
	}
}
