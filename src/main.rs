use jackc::cli::*;
use palc::Parser;

fn main() {
	let jackc = jackc::Jackc;

	if let Err(e) = jackc.compile_path(&Cli::parse().path) {
		eprintln!("Failed compile: {e}");
		std::process::exit(1);
	}
}
