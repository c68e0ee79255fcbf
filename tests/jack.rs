#[cfg(test)]
mod tests {
	use std::{fs, path::PathBuf};

	#[test]
	fn compile_jack_file() {
		let jackc = jackc::Jackc;
		let input = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("Main.jack");
		let output = std::env::temp_dir().join("jackc-Main.vm");
		jackc.compile_file(&input, &output).unwrap();

		let vm_code = fs::read_to_string(&output).unwrap();
		let lines: Vec<&str> = vm_code.lines().map(|l| l.trim_start()).collect();
		assert!(lines.contains(&"function Main.main 3"));
		assert!(lines.contains(&"function Main.maxOf 2"));
		assert!(lines.contains(&"call Array.new 1"));
		assert!(lines.contains(&"call Output.printInt 1"));
		assert!(vm_code.contains("label WHILE_EXP0"));
		assert_eq!(lines.iter().filter(|l| l.starts_with("function ")).count(), 2);
	}

	#[test]
	fn compile_directory_pairs_jack_with_vm() {
		let dir = std::env::temp_dir().join("jackc-dir-test");
		fs::create_dir_all(&dir).unwrap();
		fs::write(
			dir.join("Ball.jack"),
			"class Ball { field int x; constructor Ball new(int ax) { let x = ax; return this; } }",
		)
		.unwrap();
		fs::write(dir.join("Game.jack"), "class Game { function void run() { return; } }").unwrap();
		fs::write(dir.join("notes.txt"), "not a source file").unwrap();

		let jackc = jackc::Jackc;
		jackc.compile_path(&dir).unwrap();

		let ball = fs::read_to_string(dir.join("Ball.vm")).unwrap();
		let game = fs::read_to_string(dir.join("Game.vm")).unwrap();
		assert!(ball.contains("function Ball.new 0"));
		assert!(ball.contains("call Memory.alloc 1"));
		assert!(game.contains("function Game.run 0"));
		assert!(!dir.join("notes.vm").exists());
	}

	#[test]
	fn failed_compilation_writes_no_output() {
		let dir = std::env::temp_dir().join("jackc-fail-test");
		fs::create_dir_all(&dir).unwrap();
		let input = dir.join("Broken.jack");
		let output = dir.join("Broken.vm");
		let _ = fs::remove_file(&output);
		fs::write(&input, "class Broken { function void f() { let x = ; } }").unwrap();

		let jackc = jackc::Jackc;
		assert!(jackc.compile_file(&input, &output).is_err());
		assert!(!output.exists());
	}
}
