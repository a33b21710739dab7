use std::env;
use std::io::{self, Write};

const LOGO: &str = concat!(
    " ___                     ___              _      \n",
    "|   \\ ___ _ __  ___     / _ \\ _ _ __ _ __| |___  \n",
    "| |) / -_) '  \\/ _ \\   | (_) | '_/ _` / _| / -_) \n",
    "|___/\\___|_|_|_\\___/    \\___/|_| \\__,_\\__|_\\___| \n",
);

const CLI_TAGLINE: &str = "demo-oracle – expected output for the QuickJS-ng smoke test";
const SERVER_TAGLINE: &str = "demo-oracle API – transcript checks over HTTP";

fn render(tagline: &str, color: bool) -> String {
    if color {
        format!("\n\x1b[96m{LOGO}\x1b[0m{tagline}\n")
    } else {
        format!("\n{LOGO}{tagline}\n")
    }
}

/// Banners go to stderr; stdout is reserved for transcripts.
fn emit(tagline: &str) {
    let color = env::var_os("NO_COLOR").is_none();
    let _ = io::stderr().write_all(render(tagline, color).as_bytes());
}

pub fn print_banner() {
    emit(CLI_TAGLINE);
}

pub fn print_server_banner() {
    emit(SERVER_TAGLINE);
}
