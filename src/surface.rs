//! Display surface: the injected capability that shows the report and
//! gathers user input.
//!
//! [`ConsoleSurface`] is the line-oriented concrete implementation used by
//! the CLI. It is generic over reader and writer so prompt flows can be
//! scripted in tests.

use std::io::{BufRead, Write};

/// Capability surface the panel drives for all user interaction.
///
/// `prompt_input` and `prompt_choice` return `None` for the distinguished
/// cancel signal; `Some("")` from `prompt_input` means blank-but-entered.
pub trait DisplaySurface {
    /// Show the report text, replacing whatever was displayed before.
    fn render_report(&mut self, text: &str);
    /// Character offsets of the current selection within the displayed text.
    fn selected_offsets(&self) -> Vec<usize>;
    fn prompt_input(&mut self, label: &str) -> Option<String>;
    fn prompt_choice(&mut self, label: &str, options: &[String]) -> Option<usize>;
    fn show_status(&mut self, text: &str);
    /// Show a detail panel (e.g. a commit log) without replacing the report.
    fn show_panel(&mut self, text: &str);
}

/// Plain stdin/stdout surface.
///
/// Selection is expressed as 1-based line numbers of the displayed report
/// and mapped to character offsets on demand. End-of-input on a prompt is
/// the cancel signal.
pub struct ConsoleSurface<R, W> {
    input: R,
    output: W,
    last_text: String,
    selected_lines: Vec<usize>,
}

impl<R: BufRead, W: Write> ConsoleSurface<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            last_text: String::new(),
            selected_lines: Vec::new(),
        }
    }

    /// Replace the selection with the given 1-based report line numbers.
    pub fn select_lines(&mut self, lines: Vec<usize>) {
        self.selected_lines = lines;
    }

    /// Print a prompt and read one line. Returns `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{prompt}");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> DisplaySurface for ConsoleSurface<R, W> {
    fn render_report(&mut self, text: &str) {
        let _ = write!(self.output, "{text}");
        let _ = self.output.flush();
        self.last_text = text.to_string();
    }

    fn selected_offsets(&self) -> Vec<usize> {
        let mut starts = vec![0usize];
        for (index, ch) in self.last_text.char_indices() {
            if ch == '\n' {
                starts.push(index + 1);
            }
        }

        self.selected_lines
            .iter()
            .filter_map(|line| line.checked_sub(1))
            .filter_map(|index| starts.get(index).copied())
            .filter(|&offset| offset < self.last_text.len())
            .collect()
    }

    fn prompt_input(&mut self, label: &str) -> Option<String> {
        self.read_line(&format!("{label} "))
    }

    fn prompt_choice(&mut self, label: &str, options: &[String]) -> Option<usize> {
        let _ = writeln!(self.output, "{label}");
        for (index, option) in options.iter().enumerate() {
            let _ = writeln!(self.output, "  {}) {}", index + 1, option);
        }

        let answer = self.read_line("> ")?;
        let number: usize = answer.trim().parse().ok()?;
        if number >= 1 && number <= options.len() {
            Some(number - 1)
        } else {
            None
        }
    }

    fn show_status(&mut self, text: &str) {
        let _ = writeln!(self.output, "* {text}");
        let _ = self.output.flush();
    }

    fn show_panel(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
        let _ = self.output.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn surface(input: &str) -> ConsoleSurface<Cursor<String>, Vec<u8>> {
        ConsoleSurface::new(Cursor::new(input.to_string()), Vec::new())
    }

    #[test]
    fn prompt_input_returns_entered_line() {
        let mut s = surface("v1.0\n");
        assert_eq!(s.prompt_input("Enter tag:"), Some("v1.0".to_string()));
    }

    #[test]
    fn prompt_input_cancels_at_end_of_input() {
        let mut s = surface("");
        assert_eq!(s.prompt_input("Enter tag:"), None);
    }

    #[test]
    fn blank_line_is_not_a_cancel() {
        let mut s = surface("\n");
        assert_eq!(s.prompt_input("Enter message:"), Some(String::new()));
    }

    #[test]
    fn prompt_choice_maps_to_zero_based_index() {
        let mut s = surface("2\n");
        let options = vec!["origin".to_string(), "fork".to_string()];
        assert_eq!(s.prompt_choice("Push to remote", &options), Some(1));
    }

    #[test]
    fn prompt_choice_rejects_out_of_range() {
        let mut s = surface("5\n");
        let options = vec!["origin".to_string()];
        assert_eq!(s.prompt_choice("Push to remote", &options), None);
    }

    #[test]
    fn selected_lines_map_to_line_start_offsets() {
        let mut s = surface("");
        s.render_report("first\nsecond\nthird\n");
        s.select_lines(vec![2]);
        assert_eq!(s.selected_offsets(), vec![6]);
    }

    #[test]
    fn selection_past_last_line_is_dropped() {
        let mut s = surface("");
        s.render_report("only\n");
        s.select_lines(vec![0, 9]);
        assert!(s.selected_offsets().is_empty());
    }
}
