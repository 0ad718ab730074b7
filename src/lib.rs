//! `lox` is a tree-walking interpreter for Lox, a small dynamically typed
//! scripting language with first-class functions, lexical closures, and
//! single-inheritance classes.
//!
//! Lox is dynamically typed: the type of a value is determined at runtime,
//! not checked ahead of time. It is a tree-walk interpreter: rather than
//! compiling to bytecode or machine code, the interpreter evaluates the
//! abstract syntax tree (AST) directly.
//!
//! ## Scanning
//! The first step is scanning: converting a string of source characters
//! into a flat list of tokens. For example, `1 + 2` becomes:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`] module as a state machine
//! over the characters of the source. It reports syntax errors — an
//! unterminated string, an unexpected character — through the shared
//! [`error::ErrorReporter`] and keeps scanning afterward, so a single run
//! can surface more than one problem at once.
//!
//! ## Parsing
//! The second step converts the token list into an abstract syntax tree: a
//! tree of [`expr::Expr`] (value-producing) and [`stmt::Stmt`] (effectful)
//! nodes. The parser in [`parser`] is hand-written recursive descent. Like
//! the scanner, it recovers from a bad declaration by synchronizing to the
//! next statement boundary instead of aborting the whole parse.
//!
//! ## Resolving
//! The third step, in [`resolver`], is a static pass over the AST that
//! determines how many enclosing scopes separate each variable reference
//! from its declaration. This side table lets the interpreter look
//! variables up by scope distance instead of walking the environment
//! chain by name at every reference, and it's what gives closures their
//! precise, non-reopened-scope semantics. The resolver also catches
//! errors that are syntactically valid but semantically wrong — reading a
//! local from inside its own initializer, a class inheriting from itself —
//! which can't be caught by the scanner or parser.
//!
//! ## Interpreting
//! The final step, in [`interpreter`], walks the resolved AST and performs
//! its effects directly — printing, mutating environments, constructing
//! instances. Most type errors surface only here (adding a string to a
//! number, calling something that isn't callable) and are reported as
//! [`error::RuntimeError`]s, which abort the rest of the running program.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use environment::Environment;
use error::ErrorReporter;
use expr::ExprId;
use function::NativeFunction;
use interpreter::Interpreter;
use object::Object;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The top-level entry point: owns the diagnostic state, the global
/// environment, and the resolver's depth table, so they persist across
/// successive calls to [`Lox::run_prompt`]'s line loop. Generic over its
/// output sink so tests can capture printed output without spawning a
/// subprocess.
pub struct Lox<W: Write> {
    reporter: ErrorReporter,
    output: W,
    globals: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
}

impl<W: Write> Lox<W> {
    pub fn new(output: W) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));
        for native in NativeFunction::get_globals() {
            globals.borrow_mut().define(native.name, Object::NativeFunction(Rc::new(native)));
        }

        Lox { reporter: ErrorReporter::new(), output, globals, locals: HashMap::new() }
    }

    /// Reads `path` and runs it once. Returns the process exit code this
    /// interpreter uses: 65 on a scan, parse, or resolve error, 70 on an
    /// uncaught runtime error, 0 otherwise, 1 if `path` couldn't be read.
    pub fn run_file(&mut self, path: &str) -> i32 {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) => {
                eprintln!("Could not read file '{path}': {error}");
                return 1;
            }
        };

        self.run_source(&contents)
    }

    /// Runs Lox source text directly, without reading a file, and
    /// returns the same exit code [`Lox::run_file`] would. Exposed for
    /// embedding and for black-box tests that exercise the pipeline on
    /// inline snippets instead of fixture files.
    pub fn run_source(&mut self, source: &str) -> i32 {
        self.run(source);

        if self.reporter.had_error() {
            65
        } else if self.reporter.had_runtime_error() {
            70
        } else {
            0
        }
    }

    /// Interactive `>`-prompt loop with line editing and a persisted
    /// history file, read with each typed line fed through the same
    /// pipeline as a file. Resets the error flags between lines so a
    /// mistake on one doesn't poison the rest of the session. Exits on
    /// EOF (Ctrl-D) or interrupt (Ctrl-C).
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("terminal to support line editing");
        let history_path = history_path();
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(&line);
                    self.run(&line);
                    self.reporter.reset();
                }
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
                Err(error) => {
                    eprintln!("Readline error: {error}");
                    break;
                }
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens(&mut self.reporter);
        if self.reporter.had_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();
        for error in parser.into_errors() {
            self.reporter.parse_error(&error.token, &error.message);
        }
        if self.reporter.had_error() {
            return;
        }

        let mut interpreter = Interpreter::new(Rc::clone(&self.globals), &mut self.locals, &mut self.output);
        let mut resolver = Resolver::new(&mut interpreter, &mut self.reporter);
        resolver.resolve(&statements);
        if self.reporter.had_error() {
            return;
        }

        interpreter.interpret(&statements, &mut self.reporter);
    }
}

/// The REPL's history file lives at `~/.lox_history`, alongside where a
/// shell keeps its own history. `None` if the home directory can't be
/// found — history is then simply not persisted across sessions.
fn history_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".lox_history"))
}

/// Runs the CLI contract given the program's arguments (not including
/// `argv[0]`): no argument starts the REPL, one argument runs that file,
/// more than one prints a usage message. Returns the process exit code;
/// `main.rs` is just `process::exit(lox::run(&args))`.
pub fn run(args: &[String]) -> i32 {
    let mut lox = Lox::new(io::stdout());

    match args.len() {
        0 => {
            lox.run_prompt();
            0
        }
        1 => lox.run_file(&args[0]),
        _ => {
            println!("Usage: lox [script]");
            64
        }
    }
}
