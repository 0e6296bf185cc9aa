use colored::Colorize;

use carstore_core::{CarRecord, Diagnostics, Severity};

pub fn print_record(record: &CarRecord) {
    println!("{}", serde_json::to_string_pretty(record).unwrap());
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        match diagnostic.severity {
            Severity::Error => eprintln!(
                "{} {}: {}",
                "✗".red(),
                diagnostic.summary.bold(),
                diagnostic.detail
            ),
            Severity::Warning => eprintln!(
                "{} {}: {}",
                "⚠".yellow(),
                diagnostic.summary.bold(),
                diagnostic.detail
            ),
        }
    }
}
