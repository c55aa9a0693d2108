use std::io::{self, IsTerminal, Read};

/// Readable stream with terminal detection. The dispatcher takes this as a
/// capability instead of touching the process-global stdin handle directly,
/// so piped-input behavior is testable with an in-process fake.
pub trait InputSource {
    fn is_terminal(&self) -> bool;
    fn read_to_string(&mut self) -> io::Result<String>;
}

/// The real process stdin.
pub struct Stdin;

impl InputSource for Stdin {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_to_string(&mut self) -> io::Result<String> {
        let mut raw = String::new();
        io::stdin().lock().read_to_string(&mut raw)?;
        Ok(raw)
    }
}

/// Returns piped input with line endings normalized to `\n` and surrounding
/// whitespace trimmed, or an empty string without blocking when the source is
/// an interactive terminal.
pub fn read_input(source: &mut impl InputSource) -> io::Result<String> {
    if source.is_terminal() {
        return Ok(String::new());
    }
    let raw = source.read_to_string()?;
    let lines: Vec<&str> = raw.lines().collect();
    Ok(lines.join("\n").trim().to_string())
}
