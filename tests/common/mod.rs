//! Shared harness for the black-box test suite. `tests_ok!` runs a Lox
//! snippet in-process and checks its printed output; `tests_err!` runs it
//! out-of-process through the built binary and checks the diagnostic on
//! stderr together with the process exit code, since those diagnostics go
//! straight to the real stderr rather than through the capturable output
//! sink.

use std::fs;
use std::path::PathBuf;

/// Writes `source` to a uniquely named file under the OS temp directory
/// so subprocess tests have a real path to hand to the binary, then
/// cleans it up once the closure returns.
pub fn with_fixture(name: &str, source: &str, body: impl FnOnce(&PathBuf)) {
    let path = std::env::temp_dir().join(format!("lox_test_{name}_{}.lox", std::process::id()));
    fs::write(&path, source).expect("write temp fixture");
    body(&path);
    let _ = fs::remove_file(&path);
}

pub fn run_to_stdout(source: &str) -> (i32, String) {
    let mut output: Vec<u8> = Vec::new();
    let mut lox = lox::Lox::new(&mut output);
    let code = lox.run_source(source);
    drop(lox);
    (code, String::from_utf8(output).expect("utf8 output"))
}

#[macro_export]
macro_rules! tests_ok {
    ($name:ident, $source:expr, [$($line:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            let (code, stdout) = $crate::common::run_to_stdout($source);
            assert_eq!(code, 0, "expected a clean run, got exit code {code}");
            let expected: Vec<&str> = vec![$($line),*];
            let expected = if expected.is_empty() { String::new() } else { format!("{}\n", expected.join("\n")) };
            assert_eq!(stdout, expected);
        }
    };
}

#[macro_export]
macro_rules! tests_err {
    ($name:ident, $source:expr, $status:expr, $stderr:expr) => {
        #[test]
        fn $name() {
            $crate::common::with_fixture(stringify!($name), $source, |path| {
                assert_cmd::Command::cargo_bin("lox")
                    .unwrap()
                    .arg(path)
                    .assert()
                    .code($status)
                    .stderr($stderr);
            });
        }
    };
}
