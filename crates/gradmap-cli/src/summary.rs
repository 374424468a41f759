use std::time::Duration;

use console::Style;
use gradmap_core::config::EdgeConfig;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    ok: Style,
    bad: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            ok: Style::new().green().bold(),
            bad: Style::new().red().bold(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(config: &EdgeConfig, executor_name: &str, workers: usize) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Sobel Edge Map"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Executor"),
        s.method.apply_to(executor_name)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Workers"),
        s.value.apply_to(workers)
    );
    println!();
}

/// One row of the `compare` table.
pub struct CompareRow {
    pub name: String,
    pub workers: usize,
    pub elapsed: Duration,
    pub matches_reference: bool,
}

pub fn print_compare_table(rows: &[CompareRow]) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<30}{:>8}{:>14}  {}",
        s.label.apply_to("Executor"),
        s.label.apply_to("Workers"),
        s.label.apply_to("Seconds"),
        s.label.apply_to("Result")
    );
    for row in rows {
        let verdict = if row.matches_reference {
            s.ok.apply_to("identical")
        } else {
            s.bad.apply_to("MISMATCH")
        };
        println!(
            "  {:<30}{:>8}{:>14.5}  {}",
            s.method.apply_to(&row.name),
            s.value.apply_to(row.workers),
            row.elapsed.as_secs_f64(),
            verdict
        );
    }
    println!();
}
