use std::env;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

use demo_oracle::banner;
use demo_oracle::check::{self, Report};
use demo_oracle::oracle;
use demo_oracle::script::SCRIPT;
use demo_oracle::sink::OutputSink;

const DEMO_ORACLE_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEMO_ORACLE_ABOUT: &str =
    "demo-oracle – expected output for the QuickJS-ng embedding smoke test.";

fn print_version() {
    println!("demo-oracle version {}", DEMO_ORACLE_VERSION);
}

fn print_about() {
    println!("{}", DEMO_ORACLE_ABOUT);
}

fn print_help() {
    println!(
        r#"
demo-oracle — help

Commands:
────────────────────────────────
demo-oracle                      → Print the expected transcript
demo-oracle script               → Print the smoke-test script (feed it to the engine)
demo-oracle check <file>         → Compare a captured transcript with the oracle
demo-oracle check -              → Same, reading the capture from stdin

Exit codes (check):
────────────────────────────────
0  transcript matches line for line
1  at least one line differs, is missing, or is extra
2  the capture could not be read / bad arguments

Matching rules:
────────────────────────────────
Lines are compared exactly. Only the newline after the last line is optional;
trailing spaces, CRLF line endings and extra blank lines are failures.

Typical run:
────────────────────────────────
demo-oracle script > demo.js
my-host demo.js > captured.txt
demo-oracle check captured.txt

Optional logging:
────────────────────────────────
RUST_LOG=debug                 → trace every emitted line on stderr
DEMO_ORACLE_OUTPUT_LOG=1       → copy the printed transcript to logs/run_latest.log
NO_COLOR=1                     → plain banner
"#
    );
}

fn read_capture(arg: &str) -> Result<Report> {
    if arg == "-" {
        let mut captured = String::new();
        io::stdin()
            .read_to_string(&mut captured)
            .context("reading transcript from stdin")?;
        Ok(check::check(&captured))
    } else {
        check::check_file(arg)
    }
}

fn run_check(arg: Option<&str>) -> ExitCode {
    let Some(arg) = arg else {
        eprintln!("Error: usage: demo-oracle check <file|->");
        return ExitCode::from(2);
    };

    match read_capture(arg) {
        Ok(report) => {
            println!("{report}");
            if report.is_pass() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let Some(arg) = args.get(1) else {
        let mut sink = OutputSink::mirrored();
        oracle::run_into(&mut sink);
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout
            .write_all(oracle::render_transcript(sink.lines()).as_bytes())
            .and_then(|_| stdout.flush())
        {
            eprintln!("Error writing transcript: {e}");
            return ExitCode::from(2);
        }
        return ExitCode::SUCCESS;
    };

    match arg.as_str() {
        "help" | "--help" | "-h" => {
            banner::print_banner();
            print_help();
        }
        "--version" | "-v" => print_version(),
        "--about" => {
            banner::print_banner();
            print_about();
        }
        "script" => print!("{SCRIPT}"),
        "check" => return run_check(args.get(2).map(String::as_str)),
        other => {
            eprintln!("Error: unknown command '{other}' (try `demo-oracle help`)");
            return ExitCode::from(2);
        }
    }
    ExitCode::SUCCESS
}
