use colored::*;
use std::io::{self, BufRead, Write};

use crate::agent::StopReason;
use crate::tools::ToolArgs;

/// Console prints agent progress with colored formatting
pub struct Console {
    user_color: Color,
    assistant_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            user_color: Color::Cyan,
            assistant_color: Color::Green,
        }
    }

    /// Create a new Console with custom colors
    pub fn with_colors(user_color: Color, assistant_color: Color) -> Self {
        Self {
            user_color,
            assistant_color,
        }
    }

    /// Print a titled banner for one run
    pub fn print_banner(&self, title: &str) {
        println!();
        println!("{}", "=".repeat(60).bright_blue());
        println!("  {}", title.bright_blue().bold());
        println!("{}", "=".repeat(60).bright_blue());
    }

    /// Print the user's query
    pub fn print_user(&self, query: &str) {
        println!("{} {}", "User Query:".color(self.user_color).bold(), query);
    }

    /// Print raw model output
    pub fn print_reasoner_output(&self, output: &str) {
        println!("{} {}", "LLM Raw Output:".bright_black().bold(), output.bright_black());
    }

    /// Print a tool invocation
    pub fn print_tool_action(&self, name: &str, args: &ToolArgs) {
        println!(
            "{} {} {:?}",
            "Calling tool:".magenta().bold(),
            name.magenta(),
            args
        );
    }

    /// Print a tool result
    pub fn print_tool_result(&self, result: &str, is_error: bool) {
        if is_error {
            println!("{} {}", "Tool Error:".red().bold(), result.red());
        } else {
            println!("{} {}", "Tool Result:".magenta().bold(), result);
        }
    }

    /// Print the final answer, labelled by how the run ended
    pub fn print_final(&self, answer: &str, stop: &StopReason) {
        let label = match stop {
            StopReason::DirectAnswer => "Final Agent Response:",
            StopReason::IterationsExhausted => "Final Agent Response (Fallback):",
            _ => "Final Agent Response (Degraded):",
        };
        println!(
            "{} {}",
            label.color(self.assistant_color).bold(),
            answer.color(self.assistant_color)
        );
        if !matches!(stop, StopReason::DirectAnswer) {
            self.print_system(&format!("Run ended early: {}", stop));
        }
    }

    /// Print a newline
    pub fn println(&self) {
        println!();
    }

    /// Print a system message (warnings, info, etc.)
    pub fn print_system(&self, message: &str) {
        println!("{} {}", "System:".yellow().bold(), message);
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Read a line of input from the user
    ///
    /// Returns `None` once stdin is closed.
    pub fn read_input(&self) -> io::Result<Option<String>> {
        self.read_input_from(&mut io::stdin().lock())
    }

    /// Read a line of input from any buffered source
    pub fn read_input_from<R: BufRead>(&self, reader: &mut R) -> io::Result<Option<String>> {
        print!("{} ", ">".color(self.user_color).bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if reader.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
