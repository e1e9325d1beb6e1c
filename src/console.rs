//! Coloured status lines for the user.
//!
//! Diagnostics for developers go through `tracing`; everything here is what a
//! user of the tool is meant to read.

use crossterm::style::Stylize;

pub fn info(msg: &str) {
    println!("{} {}", "INFO:".green().bold(), msg.green());
}

pub fn success(msg: &str) {
    println!("{} {}", "SUCCESS:".white().on_green(), msg.green().bold());
}

pub fn warn(msg: &str) {
    println!(
        "{} {}",
        "WARNING:".black().on_yellow(),
        msg.yellow().bold()
    );
}

pub fn error(msg: &str) {
    eprintln!(
        "{} {}",
        "ERROR:".white().on_red().bold(),
        format!(" {} ", msg).red()
    );
}

pub fn fatal(msg: &str) {
    eprintln!(
        "{} {}",
        "FATAL:".yellow().on_red().bold(),
        msg.red().bold()
    );
}

/// Plain, uncoloured list line.
pub fn item(msg: &str) {
    println!("  {}", msg);
}
