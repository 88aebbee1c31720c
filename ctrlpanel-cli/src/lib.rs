//! Line-oriented front-end for the command interpreter.
//!
//! The binary wires this to stdin/stdout; tests drive it with in-memory
//! buffers.

use ctrlpanel_command::{CommandResult, Console};
use ctrlpanel_store::SharedStore;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "> ";

/// Words that end the session without reaching the interpreter.
pub fn is_exit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit")
}

/// `✓ message` on success, `✗ message` on failure.
pub fn render(result: &CommandResult) -> String {
    let mark = if result.success { '✓' } else { '✗' };
    format!("{mark} {}", result.message)
}

/// Reads commands until EOF or an exit word, echoing each result.
///
/// Returns how many commands were executed.
pub fn run_repl<R: BufRead, W: Write>(
    console: &Console,
    store: &SharedStore,
    input: R,
    mut output: W,
    interactive: bool,
) -> io::Result<usize> {
    let mut executed = 0;
    let mut lines = input.lines();
    loop {
        if interactive {
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if is_exit(&line) {
            break;
        }
        let result = console.run_shared(store, &line);
        writeln!(output, "{}", render(&result))?;
        executed += 1;
    }
    Ok(executed)
}
