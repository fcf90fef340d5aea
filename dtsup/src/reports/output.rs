//! Where reports render to.

/// Sink for report lines.
///
/// Implementations only decide where a finished line goes; the layout of
/// sections, items and warnings is shared by the provided methods.
pub trait Output {
    /// Emit one finished line.
    fn line(&mut self, text: &str);

    /// Emit a diagnostic line. Goes to the same sink unless overridden.
    fn diagnostic(&mut self, text: &str) {
        self.line(text);
    }

    fn section(&mut self, name: &str) {
        self.line(&format!("{name}:"));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.line(&format!("{key}: {value}"));
    }

    fn list_item(&mut self, text: &str) {
        self.line(&format!("  - {text}"));
    }

    /// A file that was (or would be) written.
    fn added_item(&mut self, text: &str) {
        self.line(&format!("  + {text}"));
    }

    /// A file that was (or would be) deleted.
    fn removed_item(&mut self, text: &str) {
        self.line(&format!("  - {text}"));
    }

    fn warning(&mut self, msg: &str) {
        self.diagnostic(&format!("warning: {msg}"));
    }

    fn preformatted(&mut self, text: &str) {
        self.line(text);
    }

    fn newline(&mut self) {
        self.line("");
    }
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Writes report lines to stdout and warnings to stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }

    fn diagnostic(&mut self, text: &str) {
        eprintln!("{text}");
    }
}

/// Collects rendered lines; used to assert on report output.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
