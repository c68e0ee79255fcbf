/// A variable definition or lookup error with line number and type.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {type}")]
pub struct SymbolError {
	line:   usize,
	r#type: SymbolErrorType,
}

impl SymbolError {
	pub fn new(line: usize, r#type: SymbolErrorType) -> Self { Self { line, r#type } }
}

/// Types of symbol errors.
#[derive(Debug)]
pub enum SymbolErrorType {
	/// The name is already defined in the same scope.
	DuplicateDefinition(String),
	/// The name is used as a variable but defined in no visible scope.
	UndefinedVariable(String),
}

impl std::fmt::Display for SymbolErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use SymbolErrorType::*;
		match self {
			DuplicateDefinition(name) => {
				write!(f, "'{name}' is already defined in this scope")
			}
			UndefinedVariable(name) => {
				write!(f, "Undefined variable '{name}'")
			}
		}
	}
}
