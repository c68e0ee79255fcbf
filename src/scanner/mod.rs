//! Converts Jack source text into a stream of tokens.
//!
//! The scanner walks the source one character at a time. Whitespace, line
//! comments and block comments produce no tokens; everything else becomes a
//! symbol, keyword, integer constant, string constant or identifier. A
//! symbol adjacent to a word, as in `if(a=true)`, therefore splits into
//! separate tokens without needing any surrounding whitespace.
//!
//! String constants are read by a small state machine that ends at the first
//! closing quote. Jack strings have no escape sequences, so spaces and every
//! other interior character belong to the literal verbatim.
//!
//! The scanner stops at the first lexical error. There is no recovery: a
//! malformed token aborts the compilation of the whole file.
mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
pub(crate) use token::{Keyword, Token, TokenType};

use crate::error::scanner::{LexError, LexErrorType};

/// A scanner for Jack source code
pub(crate) struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points at the character currently being considered
	cursor:      usize,
	/// Tracks what source line `cursor` is on so errors can name their location
	line:        usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1 }
	}

	/// Scan all tokens from the source code
	pub fn scan_tokens(mut self) -> Result<Vec<Token<'a>>, LexError> {
		let mut tokens = Vec::new();
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = self.start;
			let r#type = self.scan_token()?;
			if !r#type.is_ignored() {
				let lexeme = &self.source[self.start..self.cursor];
				tokens.push(Token::new(r#type, lexeme, self.line));
			}
		}
		tokens.push(Token::new(Eof, "", self.line));
		Ok(tokens)
	}

	/// Scan a single token from the source code
	fn scan_token(&mut self) -> Result<TokenType<'a>, LexError> {
		let Some(next_char) = self.advance() else {
			return Ok(EmptyChar);
		};
		let r#type = match next_char {
			'{' | '}' | '(' | ')' | '[' | ']' | '.' | ',' | ';' | '+' | '-' | '*' | '&' | '|' | '<' | '>'
			| '=' | '~' => Symbol(next_char),
			'/' => {
				if self.match_next('/') {
					while self.peek().is_some_and(|c| c != '\n') {
						self.advance();
					}
					Comment
				} else if self.match_next('*') {
					self.block_comment()?
				} else {
					Symbol('/')
				}
			}
			' ' | '\r' | '\t' => EmptyChar,
			'\n' => {
				self.line += 1;
				NewLine
			}
			'"' => self.string()?,
			c if c.is_ascii_digit() => self.number()?,
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			_ => return Err(LexError::new(self.line, LexErrorType::UnexpectedCharacter(next_char))),
		};

		Ok(r#type)
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	/// Skip a `/* ... */` comment; the opening `/*` is already consumed.
	/// Block comments do not nest.
	fn block_comment(&mut self) -> Result<TokenType<'a>, LexError> {
		while let Some(c) = self.peek() {
			if c == '*' && self.peek_second() == Some('/') {
				self.advance(); // consume '*'
				self.advance(); // consume '/'
				return Ok(Comment);
			}
			if c == '\n' {
				self.line += 1;
			}
			self.advance();
		}
		Err(LexError::new(self.line, LexErrorType::UnterminatedBlockComment))
	}

	/// Scan a string constant; ends at the first `"`, never earlier
	fn string(&mut self) -> Result<TokenType<'a>, LexError> {
		while let Some(c) = self.peek() {
			if c == '"' {
				break;
			}
			if c == '\n' {
				self.line += 1
			}
			self.advance();
		}

		self.peek().ok_or_else(|| LexError::new(self.line, LexErrorType::UnterminatedString))?;
		self.advance(); // The closing "
		let value = &self.source[self.start + 1..self.cursor - 1];
		Ok(StrConst(value))
	}

	/// Scan an integer constant
	fn number(&mut self) -> Result<TokenType<'a>, LexError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		// A word may not begin with a digit: `1abc` is an error, not two tokens.
		if self.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
			while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
				self.advance();
			}
			let word = &self.source[self.start..self.cursor];
			return Err(LexError::new(self.line, LexErrorType::DigitLeadingWord(word.to_string())));
		}

		let s = &self.source[self.start..self.cursor];
		match s.parse::<u32>() {
			Ok(value) if value <= 32767 => Ok(IntConst(value as u16)),
			_ => Err(LexError::new(self.line, LexErrorType::IntegerOutOfRange(s.to_string()))),
		}
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType<'a> {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		TokenType::keyword_or_identifier(text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scan(input: &str, ok: bool) {
		let result = Scanner::new(input).scan_tokens();
		assert!(result.is_ok() == ok, "{input:?}");
	}

	fn types(input: &str) -> Vec<TokenType<'_>> {
		let tokens = Scanner::new(input).scan_tokens().unwrap();
		tokens.into_iter().map(|t| t.r#type).collect()
	}

	#[test]
	fn scan_tokens() {
		scan("", true);
		scan("(", true);
		scan("(){}[]", true);
		scan(" ( ) ", true);
		scan("@", false);
		scan("你好", false);
		scan("class Square { field int x; }", true);
		scan("// Comment", true);
		scan("/* Unterminated comment ", false);
		scan("user", true);
		scan("return", true);
	}

	#[test]
	fn scan_symbols() {
		for symbol in "{}()[].,;+-*/&|<>=~".chars() {
			let mut input = String::new();
			input.push(symbol);
			let tokens = Scanner::new(&input).scan_tokens().unwrap();
			assert_eq!(tokens[0].r#type, Symbol(symbol));
		}
	}

	#[test]
	fn scan_adjacent_symbols_split() {
		let keyword = TokenType::keyword_or_identifier;
		assert_eq!(
			types("if(a=true)"),
			vec![keyword("if"), Symbol('('), Identifier("a"), Symbol('='), keyword("true"), Symbol(')'), Eof]
		);
		assert_eq!(types("a[i]=-1;").len(), 9);
	}

	#[test]
	fn scan_numbers() {
		assert_eq!(types("0"), vec![IntConst(0), Eof]);
		assert_eq!(types("42"), vec![IntConst(42), Eof]);
		assert_eq!(types("32767"), vec![IntConst(32767), Eof]);
		scan("32768", false);
		scan("99999999999", false);
		scan("1abc", false);
		scan("1_x", false);
	}

	#[test]
	fn scan_strings() {
		assert_eq!(types(r#""""#), vec![StrConst(""), Eof]);
		assert_eq!(types(r#""hello world""#), vec![StrConst("hello world"), Eof]);
		assert_eq!(types(r#""how; many, (tokens)?""#), vec![StrConst("how; many, (tokens)?"), Eof]);
		scan(r#""unterminated"#, false);
	}

	#[test]
	fn scan_keywords_and_identifiers() {
		assert!(matches!(types("class")[0], TokenType::Keyword(_)));
		assert!(matches!(types("constructor")[0], TokenType::Keyword(_)));
		assert_eq!(types("let")[0], TokenType::keyword_or_identifier("let"));
		assert_eq!(types("x"), vec![Identifier("x"), Eof]);
		assert_eq!(types("_name"), vec![Identifier("_name"), Eof]);
		assert_eq!(types("myVariable123"), vec![Identifier("myVariable123"), Eof]);
	}

	#[test]
	fn scan_comments() {
		assert_eq!(types("// line comment"), vec![Eof]);
		assert_eq!(types("/* block comment */"), vec![Eof]);
		assert_eq!(types("/** doc\n * comment\n */"), vec![Eof]);
		assert_eq!(types("a // rest is gone\nb"), vec![Identifier("a"), Identifier("b"), Eof]);
		assert_eq!(types("a /* x\ny */ b"), vec![Identifier("a"), Identifier("b"), Eof]);
		scan("/* unterminated", false);
	}

	#[test]
	fn scan_line_numbers() {
		let tokens = Scanner::new("class\n\nMain\n{").scan_tokens().unwrap();
		assert_eq!(tokens[0].line, 1);
		assert_eq!(tokens[1].line, 3);
		assert_eq!(tokens[2].line, 4);
	}

	#[test]
	fn printed_tokens_scan_back_to_themselves() {
		let source = r#"class Main { function void main() { do Output.printString("Hi there"); return; } }"#;
		let tokens = Scanner::new(source).scan_tokens().unwrap();
		let printed =
			tokens.iter().map(|t| t.r#type.to_string()).collect::<Vec<_>>().join(" ");
		let rescanned = Scanner::new(&printed).scan_tokens().unwrap();
		let original: Vec<String> = tokens.iter().map(|t| format!("{:?}", t.r#type)).collect();
		let round_tripped: Vec<String> = rescanned.iter().map(|t| format!("{:?}", t.r#type)).collect();
		assert_eq!(original, round_tripped);
	}
}
