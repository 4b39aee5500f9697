//! Reading interactive input.

use std::io::BufRead;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// The line is trimmed of surrounding whitespace. Returns `None` on EOF or a
/// read error.
///
/// # Example
///
/// ```rust,no_run
/// use std::io;
/// # use bjcoach_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}
