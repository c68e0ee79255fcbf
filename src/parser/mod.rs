//! Single-pass recursive-descent compilation of the Jack grammar.
//!
//! The parser never builds a syntax tree. Each grammar production is a
//! `compile_*` method that consumes its tokens and appends the VM
//! instructions for the construct as a side effect, so parsing order is
//! emission order. Variable declarations feed the symbol table; every later
//! identifier use reads it back to pick the right segment and index.
//!
//! Jack grammar:
//!
//! ``` BNF
//! class           -> "class" NAME "{" classVarDec* subroutineDec* "}" ;
//! classVarDec     -> ( "static" | "field" ) type NAME ( "," NAME )* ";" ;
//! subroutineDec   -> ( "constructor" | "function" | "method" )
//!                    ( type | "void" ) NAME "(" parameterList ")" subroutineBody ;
//! parameterList   -> ( type NAME ( "," type NAME )* )? ;
//! subroutineBody  -> "{" varDec* statement* "}" ;
//! varDec          -> "var" type NAME ( "," NAME )* ";" ;
//! type            -> "int" | "char" | "boolean" | NAME ;
//! statement       -> letStmt | ifStmt | whileStmt | doStmt | returnStmt ;
//! letStmt         -> "let" NAME ( "[" expression "]" )? "=" expression ";" ;
//! ifStmt          -> "if" "(" expression ")" "{" statement* "}"
//!                    ( "else" "{" statement* "}" )? ;
//! whileStmt       -> "while" "(" expression ")" "{" statement* "}" ;
//! doStmt          -> "do" subroutineCall ";" ;
//! returnStmt      -> "return" expression? ";" ;
//! expression      -> term ( op term )* ;
//! term            -> INT | STRING | "true" | "false" | "null" | "this"
//!                  | NAME | NAME "[" expression "]" | subroutineCall
//!                  | "(" expression ")" | ( "-" | "~" ) term ;
//! subroutineCall  -> NAME "(" expressionList ")"
//!                  | NAME "." NAME "(" expressionList ")" ;
//! expressionList  -> ( expression ( "," expression )* )? ;
//! op              -> "+" | "-" | "*" | "/" | "&" | "|" | "<" | ">" | "=" ;
//! ```
//!
//! Binary operators are left-associative with no precedence: `1 + 2 * 3`
//! computes `(1 + 2) * 3`. `*` and `/` have no VM opcode and become calls
//! to `Math.multiply` and `Math.divide`.

pub(crate) mod cursor;

use cursor::TokenCursor;

use crate::{
	emitter::{Command, Segment, VmWriter},
	error::{parser::{ParseError, ParseErrorType}, symbol_table::{SymbolError, SymbolErrorType}},
	scanner::{Keyword, Token, TokenType},
	symbol_table::{Entry, Kind, SymbolTable},
};

/// Compiles one scanned Jack class into VM assembly text.
pub(crate) struct Parser<'a> {
	/// The tokens to compile.
	tokens:      TokenCursor<'a>,
	/// Class- and subroutine-scope variables.
	symbols:     SymbolTable<'a>,
	/// The VM instruction sink.
	writer:      VmWriter,
	/// Captured after `class`; qualifies subroutine names and types `this`.
	class_name:  &'a str,
	/// The current subroutine's declared return type.
	return_type: &'a str,
	/// Mints unique flow-control labels; monotonic across the class.
	label_count: u16,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self {
		Self {
			tokens:      TokenCursor::new(tokens),
			symbols:     SymbolTable::new(),
			writer:      VmWriter::new(),
			class_name:  "",
			return_type: "",
			label_count: 0,
		}
	}

	/// Compile the whole token stream into VM assembly text.
	pub fn compile(mut self) -> crate::Result<String> {
		self.compile_class()?;
		if self.tokens.more() {
			let trailing = self.tokens.peek()?;
			let found = trailing.r#type.describe();
			return Err(ParseError::new(trailing.line, ParseErrorType::TrailingTokens { found }).into());
		}
		Ok(self.writer.finish())
	}

	/// class -> "class" NAME "{" classVarDec* subroutineDec* "}"
	fn compile_class(&mut self) -> crate::Result<()> {
		self.expect_keyword(Keyword::Class)?;
		self.class_name = self.expect_identifier()?.lexeme;
		self.expect_symbol('{')?;
		while let TokenType::Keyword(keyword @ (Keyword::Static | Keyword::Field)) =
			self.tokens.peek()?.r#type
		{
			self.compile_class_var_dec(keyword)?;
		}
		while let TokenType::Keyword(
			keyword @ (Keyword::Constructor | Keyword::Function | Keyword::Method),
		) = self.tokens.peek()?.r#type
		{
			self.compile_subroutine(keyword)?;
		}
		self.expect_symbol('}')
	}

	/// classVarDec -> ("static" | "field") type NAME ("," NAME)* ";"
	fn compile_class_var_dec(&mut self, keyword: Keyword) -> crate::Result<()> {
		self.tokens.advance()?; // consume 'static' or 'field'
		let kind = if keyword == Keyword::Static { Kind::Static } else { Kind::Field };
		let r#type = self.expect_type()?;
		loop {
			let name = self.expect_identifier()?;
			self.define(&name, r#type, kind)?;
			if !self.eat_symbol(',')? {
				break;
			}
		}
		self.expect_symbol(';')
	}

	/// subroutineDec -> ("constructor" | "function" | "method")
	///                  (type | "void") NAME "(" parameterList ")" subroutineBody
	///
	/// The `function` instruction needs the local count, so all `var` lines
	/// are consumed before anything is emitted. A method binds its receiver
	/// as argument 0 ahead of the declared parameters, and anchors `this`
	/// from it on entry; a constructor instead allocates one object's worth
	/// of fields and anchors `this` at the fresh block.
	fn compile_subroutine(&mut self, flavor: Keyword) -> crate::Result<()> {
		self.tokens.advance()?; // consume the flavor keyword
		self.symbols.start_subroutine();
		self.return_type = self.expect_return_type()?;
		let name = self.expect_identifier()?;
		if flavor == Keyword::Method {
			self.define_this(name.line)?;
		}
		self.expect_symbol('(')?;
		self.compile_parameter_list()?;
		self.expect_symbol(')')?;
		self.expect_symbol('{')?;
		let mut locals = 0;
		while self.tokens.peek()?.r#type == TokenType::Keyword(Keyword::Var) {
			locals += self.compile_var_dec()?;
		}

		let function_name = format!("{}.{}", self.class_name, name.lexeme);
		self.writer.function(&function_name, locals);
		self.writer.indent();
		match flavor {
			Keyword::Constructor => {
				self.writer.push(Segment::Constant, self.symbols.count(Kind::Field));
				self.writer.call("Memory.alloc", 1);
				self.writer.pop(Segment::Pointer, 0);
			}
			Keyword::Method => {
				self.writer.push(Segment::Argument, 0);
				self.writer.pop(Segment::Pointer, 0);
			}
			_ => {}
		}
		self.compile_statements()?;
		self.expect_symbol('}')?;
		self.writer.dedent();
		Ok(())
	}

	/// parameterList -> (type NAME ("," type NAME)*)?
	fn compile_parameter_list(&mut self) -> crate::Result<()> {
		if self.peek_symbol(')')? {
			return Ok(());
		}
		loop {
			let r#type = self.expect_type()?;
			let name = self.expect_identifier()?;
			self.define(&name, r#type, Kind::Arg)?;
			if !self.eat_symbol(',')? {
				break;
			}
		}
		Ok(())
	}

	/// varDec -> "var" type NAME ("," NAME)* ";"
	///
	/// Returns how many locals the line declared.
	fn compile_var_dec(&mut self) -> crate::Result<u16> {
		self.tokens.advance()?; // consume 'var'
		let r#type = self.expect_type()?;
		let mut declared = 0;
		loop {
			let name = self.expect_identifier()?;
			self.define(&name, r#type, Kind::Var)?;
			declared += 1;
			if !self.eat_symbol(',')? {
				break;
			}
		}
		self.expect_symbol(';')?;
		Ok(declared)
	}

	/// statement* ; stops at the first token that opens no statement
	fn compile_statements(&mut self) -> crate::Result<()> {
		loop {
			match self.tokens.peek()?.r#type {
				TokenType::Keyword(Keyword::Let) => self.compile_let()?,
				TokenType::Keyword(Keyword::If) => self.compile_if()?,
				TokenType::Keyword(Keyword::While) => self.compile_while()?,
				TokenType::Keyword(Keyword::Do) => self.compile_do()?,
				TokenType::Keyword(Keyword::Return) => self.compile_return()?,
				_ => return Ok(()),
			}
		}
	}

	/// letStmt -> "let" NAME ("[" expression "]")? "=" expression ";"
	///
	/// An array store computes the element address first and the value
	/// second, then parks the value in `temp 0` while `pointer 1` is
	/// re-anchored. The order is load-bearing: the right-hand side may
	/// itself read through `that`, so `pointer 1` must not move until the
	/// value is fully evaluated.
	fn compile_let(&mut self) -> crate::Result<()> {
		self.tokens.advance()?; // consume 'let'
		let name = self.expect_identifier()?;
		let entry = self.resolve(&name)?;
		if self.eat_symbol('[')? {
			self.writer.push(entry.kind.segment(), entry.index);
			self.compile_expression()?;
			self.expect_symbol(']')?;
			self.writer.command(Command::Add);
			self.expect_symbol('=')?;
			self.compile_expression()?;
			self.expect_symbol(';')?;
			self.writer.pop(Segment::Temp, 0);
			self.writer.pop(Segment::Pointer, 1);
			self.writer.push(Segment::Temp, 0);
			self.writer.pop(Segment::That, 0);
		} else {
			self.expect_symbol('=')?;
			self.compile_expression()?;
			self.expect_symbol(';')?;
			self.writer.pop(entry.kind.segment(), entry.index);
		}
		Ok(())
	}

	/// ifStmt -> "if" "(" expression ")" "{" statement* "}"
	///           ("else" "{" statement* "}")?
	fn compile_if(&mut self) -> crate::Result<()> {
		self.tokens.advance()?; // consume 'if'
		self.expect_symbol('(')?;
		self.compile_expression()?;
		self.expect_symbol(')')?;
		let n = self.next_label();
		let else_label = format!("IF_ELSE{n}");
		let end_label = format!("IF_END{n}");
		self.writer.command(Command::Not);
		self.writer.if_goto(&else_label);
		self.expect_symbol('{')?;
		self.compile_statements()?;
		self.expect_symbol('}')?;
		self.writer.goto(&end_label);
		self.writer.label(&else_label);
		if self.tokens.peek()?.r#type == TokenType::Keyword(Keyword::Else) {
			self.tokens.advance()?; // consume 'else'
			self.expect_symbol('{')?;
			self.compile_statements()?;
			self.expect_symbol('}')?;
		}
		self.writer.label(&end_label);
		Ok(())
	}

	/// whileStmt -> "while" "(" expression ")" "{" statement* "}"
	fn compile_while(&mut self) -> crate::Result<()> {
		self.tokens.advance()?; // consume 'while'
		let n = self.next_label();
		let top_label = format!("WHILE_EXP{n}");
		let end_label = format!("WHILE_END{n}");
		self.writer.label(&top_label);
		self.expect_symbol('(')?;
		self.compile_expression()?;
		self.expect_symbol(')')?;
		self.writer.command(Command::Not);
		self.writer.if_goto(&end_label);
		self.expect_symbol('{')?;
		self.compile_statements()?;
		self.expect_symbol('}')?;
		self.writer.goto(&top_label);
		self.writer.label(&end_label);
		Ok(())
	}

	/// doStmt -> "do" subroutineCall ";"
	fn compile_do(&mut self) -> crate::Result<()> {
		self.tokens.advance()?; // consume 'do'
		self.compile_subroutine_call()?;
		self.expect_symbol(';')?;
		// Every callee leaves a return value; `do` discards it.
		self.writer.pop(Segment::Temp, 0);
		Ok(())
	}

	/// returnStmt -> "return" expression? ";"
	///
	/// A void subroutine still must leave a value for the caller to discard.
	fn compile_return(&mut self) -> crate::Result<()> {
		self.tokens.advance()?; // consume 'return'
		if self.return_type == "void" {
			self.writer.push(Segment::Constant, 0);
		} else {
			self.compile_expression()?;
		}
		self.expect_symbol(';')?;
		self.writer.ret();
		Ok(())
	}

	/// expression -> term (op term)* ; left-associative, no precedence
	fn compile_expression(&mut self) -> crate::Result<()> {
		self.compile_term()?;
		while let TokenType::Symbol(op @ ('+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '=')) =
			self.tokens.peek()?.r#type
		{
			self.tokens.advance()?; // consume the operator
			self.compile_term()?;
			match op {
				'+' => self.writer.command(Command::Add),
				'-' => self.writer.command(Command::Sub),
				'&' => self.writer.command(Command::And),
				'|' => self.writer.command(Command::Or),
				'<' => self.writer.command(Command::Lt),
				'>' => self.writer.command(Command::Gt),
				'=' => self.writer.command(Command::Eq),
				'*' => self.writer.call("Math.multiply", 2),
				_ => self.writer.call("Math.divide", 2),
			}
		}
		Ok(())
	}

	/// term -> INT | STRING | keyword constant | NAME | NAME "[" expression "]"
	///       | subroutineCall | "(" expression ")" | ("-" | "~") term
	///
	/// An identifier alone does not say which alternative applies; the token
	/// after it does: `(` or `.` opens a call, `[` an array access, anything
	/// else leaves a plain variable read.
	fn compile_term(&mut self) -> crate::Result<()> {
		let token = *self.tokens.peek()?;
		match token.r#type {
			TokenType::IntConst(value) => {
				self.tokens.advance()?;
				self.writer.push(Segment::Constant, value);
			}
			TokenType::StrConst(text) => {
				self.tokens.advance()?;
				self.compile_string(text);
			}
			TokenType::Keyword(Keyword::True) => {
				self.tokens.advance()?;
				// true is the all-ones word
				self.writer.push(Segment::Constant, 0);
				self.writer.command(Command::Not);
			}
			TokenType::Keyword(Keyword::False | Keyword::Null) => {
				self.tokens.advance()?;
				self.writer.push(Segment::Constant, 0);
			}
			TokenType::Keyword(Keyword::This) => {
				self.tokens.advance()?;
				self.writer.push(Segment::Pointer, 0);
			}
			TokenType::Symbol('(') => {
				self.tokens.advance()?; // consume '('
				self.compile_expression()?;
				self.expect_symbol(')')?;
			}
			TokenType::Symbol('-') => {
				self.tokens.advance()?;
				self.compile_term()?;
				self.writer.command(Command::Neg);
			}
			TokenType::Symbol('~') => {
				self.tokens.advance()?;
				self.compile_term()?;
				self.writer.command(Command::Not);
			}
			TokenType::Identifier(_) => match self.tokens.peek_second()?.r#type {
				TokenType::Symbol('(' | '.') => self.compile_subroutine_call()?,
				TokenType::Symbol('[') => {
					let name = self.tokens.advance()?;
					let entry = self.resolve(&name)?;
					self.tokens.advance()?; // consume '['
					self.writer.push(entry.kind.segment(), entry.index);
					self.compile_expression()?;
					self.expect_symbol(']')?;
					self.writer.command(Command::Add);
					self.writer.pop(Segment::Pointer, 1);
					self.writer.push(Segment::That, 0);
				}
				_ => {
					let name = self.tokens.advance()?;
					let entry = self.resolve(&name)?;
					self.writer.push(entry.kind.segment(), entry.index);
				}
			},
			_ => {
				let found = token.r#type.describe();
				return Err(ParseError::new(token.line, ParseErrorType::ExpectedTerm { found }).into());
			}
		}
		Ok(())
	}

	/// A string constant builds a `String` object at runtime, one
	/// `appendChar` per character.
	fn compile_string(&mut self, text: &str) {
		self.writer.push(Segment::Constant, text.len() as u16);
		self.writer.call("String.new", 1);
		for c in text.bytes() {
			self.writer.push(Segment::Constant, c as u16);
			self.writer.call("String.appendChar", 2);
		}
	}

	/// subroutineCall -> NAME "(" expressionList ")"
	///                 | NAME "." NAME "(" expressionList ")"
	///
	/// A bare name is a method call on the current object. A qualified name
	/// is a method call when the qualifier resolves to a variable (the
	/// receiver is pushed and the callee belongs to the variable's type);
	/// otherwise the qualifier is a class name and nothing is pushed.
	fn compile_subroutine_call(&mut self) -> crate::Result<()> {
		let first = self.expect_identifier()?;
		if self.eat_symbol('.')? {
			let sub = self.expect_identifier()?;
			match self.symbols.resolve(first.lexeme) {
				Some(receiver) => {
					self.writer.push(receiver.kind.segment(), receiver.index);
					let args = self.compile_arguments()?;
					self.writer.call(&format!("{}.{}", receiver.r#type, sub.lexeme), args + 1);
				}
				None => {
					let args = self.compile_arguments()?;
					self.writer.call(&format!("{}.{}", first.lexeme, sub.lexeme), args);
				}
			}
		} else {
			self.writer.push(Segment::Pointer, 0);
			let args = self.compile_arguments()?;
			self.writer.call(&format!("{}.{}", self.class_name, first.lexeme), args + 1);
		}
		Ok(())
	}

	/// "(" expressionList ")" ; returns the number of expressions compiled
	fn compile_arguments(&mut self) -> crate::Result<usize> {
		self.expect_symbol('(')?;
		if self.eat_symbol(')')? {
			return Ok(0);
		}
		self.compile_expression()?;
		let mut count = 1;
		while self.eat_symbol(',')? {
			self.compile_expression()?;
			count += 1;
		}
		self.expect_symbol(')')?;
		Ok(count)
	}
}

impl<'a> Parser<'a> {
	/// Consume the current token if it is the expected symbol.
	fn expect_symbol(&mut self, expected: char) -> crate::Result<()> {
		let token = self.tokens.peek()?;
		if token.r#type == TokenType::Symbol(expected) {
			self.tokens.advance()?;
			Ok(())
		} else {
			let found = token.r#type.describe();
			Err(ParseError::new(token.line, ParseErrorType::ExpectedSymbol { expected, found }).into())
		}
	}

	/// Consume the current token if it is the expected symbol, without
	/// failing otherwise.
	fn eat_symbol(&mut self, expected: char) -> crate::Result<bool> {
		if self.peek_symbol(expected)? {
			self.tokens.advance()?;
			Ok(true)
		} else {
			Ok(false)
		}
	}

	fn peek_symbol(&self, expected: char) -> crate::Result<bool> {
		Ok(self.tokens.peek()?.r#type == TokenType::Symbol(expected))
	}

	fn expect_keyword(&mut self, expected: Keyword) -> crate::Result<()> {
		let token = self.tokens.peek()?;
		if token.r#type == TokenType::Keyword(expected) {
			self.tokens.advance()?;
			Ok(())
		} else {
			let (expected, found) = (expected.as_str(), token.r#type.describe());
			Err(ParseError::new(token.line, ParseErrorType::ExpectedKeyword { expected, found }).into())
		}
	}

	fn expect_identifier(&mut self) -> crate::Result<Token<'a>> {
		let token = self.tokens.peek()?;
		match token.r#type {
			TokenType::Identifier(_) => Ok(self.tokens.advance()?),
			_ => {
				let found = token.r#type.describe();
				Err(ParseError::new(token.line, ParseErrorType::ExpectedIdentifier { found }).into())
			}
		}
	}

	/// type -> "int" | "char" | "boolean" | NAME
	fn expect_type(&mut self) -> crate::Result<&'a str> {
		let token = self.tokens.peek()?;
		match token.r#type {
			TokenType::Keyword(Keyword::Int | Keyword::Char | Keyword::Boolean)
			| TokenType::Identifier(_) => Ok(self.tokens.advance()?.lexeme),
			_ => {
				let found = token.r#type.describe();
				Err(ParseError::new(token.line, ParseErrorType::ExpectedType { found }).into())
			}
		}
	}

	/// "void" | type
	fn expect_return_type(&mut self) -> crate::Result<&'a str> {
		if self.tokens.peek()?.r#type == TokenType::Keyword(Keyword::Void) {
			Ok(self.tokens.advance()?.lexeme)
		} else {
			self.expect_type()
		}
	}

	/// Define `name` as a variable, or fail if its scope already has it.
	fn define(&mut self, name: &Token<'a>, r#type: &'a str, kind: Kind) -> crate::Result<()> {
		match self.symbols.define(name.lexeme, r#type, kind) {
			Some(_) => Ok(()),
			None => {
				let duplicate = SymbolErrorType::DuplicateDefinition(name.lexeme.to_string());
				Err(SymbolError::new(name.line, duplicate).into())
			}
		}
	}

	/// Bind the receiver of a method as argument 0, so the declared
	/// parameters number from 1.
	fn define_this(&mut self, line: usize) -> crate::Result<()> {
		match self.symbols.define("this", self.class_name, Kind::Arg) {
			Some(_) => Ok(()),
			None => {
				let duplicate = SymbolErrorType::DuplicateDefinition("this".to_string());
				Err(SymbolError::new(line, duplicate).into())
			}
		}
	}

	/// Look a variable up, or fail with the name that is missing.
	fn resolve(&self, name: &Token<'a>) -> crate::Result<Entry<'a>> {
		self.symbols.resolve(name.lexeme).ok_or_else(|| {
			SymbolError::new(name.line, SymbolErrorType::UndefinedVariable(name.lexeme.to_string())).into()
		})
	}

	fn next_label(&mut self) -> u16 {
		let n = self.label_count;
		self.label_count += 1;
		n
	}
}
