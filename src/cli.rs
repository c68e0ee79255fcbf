use std::path::PathBuf;

use palc::Parser;

/// CLI arguments
#[derive(Parser)]
#[command(
	name = "jackc",
	after_long_help = "Compiles Jack classes into Hack VM assembly, one .vm file per .jack file."
)]
pub struct Cli {
	/// A .jack source file, or a directory containing .jack files
	pub path: PathBuf,
}
