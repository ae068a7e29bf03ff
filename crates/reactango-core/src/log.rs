//! Colored status-line output

use colored::Colorize;

pub fn error(message: impl AsRef<str>) {
    eprintln!("{} {}", "error:".red().bold(), message.as_ref().red().bold());
}

pub fn warning(message: impl AsRef<str>) {
    eprintln!(
        "{} {}",
        "warning:".yellow().bold(),
        message.as_ref().yellow().bold()
    );
}

pub fn success(message: impl AsRef<str>) {
    println!("{}", message.as_ref().green().bold());
}

pub fn info(message: impl AsRef<str>) {
    println!("{}", message.as_ref().cyan().bold());
}

pub fn step(message: impl AsRef<str>) {
    println!("{}", message.as_ref().blue().bold());
}
