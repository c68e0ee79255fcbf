//! # How a Jack class becomes VM assembly
//!
//! Source code: `let a[i] = i * 2;`

//! ## Scanning
//!
//! The scanner takes the characters of one `.jack` file and converts them
//! into tokens: symbols `[`, `=`, keywords `let`, integer constants `2`,
//! string constants `"hi!"`, identifiers `a` and `i`.
//!
//! Whitespace and comments are dropped. Symbols need no spacing around
//! them, so `a[i]` is already three tokens. The statement above becomes
//! `["let", "a", "[", "i", "]", "=", "i", "*", "2", ";"]`.

//! ## Compiling in a single pass
//!
//! Jack was designed so that a compiler never needs to look more than a
//! token or two ahead, and never needs to revisit what it already read.
//! So there is no syntax tree: the parser recognizes each grammar
//! production and emits its VM instructions on the spot. The only state it
//! carries between constructs is the symbol table and a label counter.
//!
//! Two tables track variables: the class scope (`static` and `field`
//! variables) and the subroutine scope (arguments and `var` locals), reset
//! for every subroutine. A name defined in the subroutine scope shadows
//! the class scope. Each definition gets a dense index within its kind,
//! and kind picks the VM segment: `static`→`static`, `field`→`this`,
//! argument→`argument`, local→`local`. That pair is all the code
//! generator needs to read or write any variable.

//! ## The target machine
//!
//! The VM is a stack machine. `push segment i` copies a value onto the
//! stack, `pop segment i` moves the top into a segment slot, and the
//! arithmetic commands replace the top one or two values with their
//! result. Flow control is `label`/`goto`/`if-goto`, and subroutines are
//! `function Class.sub n` / `call Class.sub n` / `return`.
//!
//! The calling convention does the interesting work. A method call pushes
//! its receiver before the declared arguments, so the callee finds the
//! object as `argument 0` and anchors the `this` segment at it. A
//! constructor instead asks `Memory.alloc` for one object's worth of
//! fields and anchors `this` at the fresh block; `return this` hands the
//! address back to the caller. Array access re-anchors the `that` segment
//! at `base + index`, after which the element is `that 0`.

//! ## What this crate is not
//!
//! There is no optimizer, no type checker beyond the symbol tables, and no
//! error recovery: the first bad token aborts the file. The operating
//! system classes the emitted code calls into (`Math`, `Memory`, `String`,
//! `Output`, ...) are the runtime's concern, not the compiler's.

pub mod cli;
mod emitter;
mod error;
mod jackc;
mod parser;
mod scanner;
mod symbol_table;

pub use error::{
	JackError,
	parser::{ParseError, ParseErrorType},
	scanner::{LexError, LexErrorType},
	symbol_table::{SymbolError, SymbolErrorType},
};
pub use jackc::Jackc;

/// Crate-wide result type, defaulting to the top-level compiler error.
pub type Result<T, E = JackError> = std::result::Result<T, E>;
