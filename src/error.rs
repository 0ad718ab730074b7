use crate::token::{Token, Type};

/// Sink for every diagnostic the pipeline can produce. Tracks two
/// flags: `had_error` gates whether execution runs at all,
/// `had_runtime_error` only affects the process exit code.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        ErrorReporter::default()
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears both flags. Used between REPL inputs.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    fn report(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("[line {line}] Error{location}: {message}");
        self.had_error = true;
    }

    pub fn scan_error(&mut self, line: usize, message: &str) {
        self.report(line, "", message);
    }

    pub fn parse_error(&mut self, token: &Token, message: &str) {
        if token.r#type == Type::EOF {
            self.report(token.location.line, " at end", message);
        } else {
            self.report(token.location.line, &format!(" at '{}'", token.lexeme), message);
        }
    }

    pub fn resolve_error(&mut self, token: &Token, message: &str) {
        self.report(token.location.line, &format!(" at '{}'", token.lexeme), message);
    }

    pub fn runtime_error(&mut self, error: &RuntimeError) {
        eprintln!("{}\n[line {}]", error.message, error.token.location.line);
        self.had_runtime_error = true;
    }
}

/// A runtime fault: failed type check, undefined name, wrong arity, and
/// so on. Propagated as `Err` up to the nearest `interpret` call, which
/// reports it and aborts the rest of the program.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError { token, message: message.into() }
    }
}
