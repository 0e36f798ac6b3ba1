//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - shot-sampling quantum circuit runner",
        style("qrun").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qrun-ir           Gate operations and validated circuits");
    println!("  qrun-adapter-sim  Statevector simulator and circuit runner");
    println!("  qrun-cli          Command-line interface");
    println!();
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
