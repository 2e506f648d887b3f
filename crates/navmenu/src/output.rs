//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Messages go to stderr; command results go to stdout so they can be piped.
pub(crate) struct Output {
    term: Term,
    stdout: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Write a result line to stdout.
    pub(crate) fn result(&self, line: &str) -> std::io::Result<()> {
        self.stdout.write_line(line)
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Style text as highlighted (cyan bold).
    pub(crate) fn highlighted(&self, text: &str) -> String {
        self.cyan_bold.apply_to(text).to_string()
    }

    /// Style text as secondary (dim).
    pub(crate) fn dimmed(&self, text: &str) -> String {
        self.dim.apply_to(text).to_string()
    }
}
