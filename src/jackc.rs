use std::{ffi::OsStr, fs, path::Path};

use anyhow::Context;

use crate::{parser::Parser, scanner::Scanner};

/// The compiler facade: file and directory driving around the core
/// scan-and-compile pipeline.
pub struct Jackc;

impl Jackc {
	/// Compile a `.jack` file, or every `.jack` file in a directory.
	pub fn compile_path(&self, path: &Path) -> crate::Result<()> {
		if path.is_dir() {
			self.compile_dir(path)
		} else {
			self.compile_file(path, &path.with_extension("vm"))
		}
	}

	/// Compile every `.jack` entry of `dir`, pairing `Foo.jack` with `Foo.vm`
	/// beside it. Stops at the first file that fails.
	pub fn compile_dir(&self, dir: &Path) -> crate::Result<()> {
		let entries = fs::read_dir(dir).context("Failed list source directory")?;
		for entry in entries {
			let path = entry.context("Failed read directory entry")?.path();
			if path.extension() == Some(OsStr::new("jack")) {
				self.compile_file(&path, &path.with_extension("vm"))?;
			}
		}
		Ok(())
	}

	/// Compile one source file into `output`. The output file is written
	/// only when the whole compilation succeeds, so a failure leaves no
	/// partial `.vm` behind.
	pub fn compile_file(&self, input: &Path, output: &Path) -> crate::Result<()> {
		let source = fs::read_to_string(input).context("Failed open source file")?;
		let vm_code = self.compile(&source)?;
		fs::write(output, vm_code).context("Failed write output file")?;
		Ok(())
	}
}

impl Jackc {
	/// The core pipeline: scan the source, then parse and generate VM code
	/// in one pass.
	pub fn compile(&self, source: &str) -> crate::Result<String> {
		let tokens = Scanner::new(source).scan_tokens()?;
		Parser::new(tokens).compile()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn compile_source() {
		let jackc = Jackc;
		assert!(jackc.compile("class Main { function void main() { return; } }").is_ok());
		assert!(jackc.compile("class Main { }").is_ok());
		assert!(jackc.compile("class Main {").is_err());
		assert!(jackc.compile("").is_err());
		assert!(jackc.compile("let x = 1;").is_err());
	}

	#[test]
	fn compile_reports_the_failing_construct() {
		let jackc = Jackc;
		let error = jackc.compile("class Main { function void main() { return }").unwrap_err();
		assert!(error.to_string().contains("';'"), "{error}");
	}
}
