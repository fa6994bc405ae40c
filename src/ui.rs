// Terminal output helpers

use colored::Colorize;

pub fn print_header(title: &str) {
    println!();
    println!("{}", format!("== {} ==", title).bright_blue().bold());
    println!();
}

pub fn print_success(message: &str) {
    println!("{}", format!("✅ {}", message).bright_green().bold());
}

pub fn print_info(message: &str) {
    println!("{}", format!("ℹ️  {}", message).bright_cyan());
}
