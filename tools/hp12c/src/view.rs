//! Terminal rendering of calculator state

use colored::*;
use hp12c_engine::display::format_decimal;
use hp12c_engine::{Calculator, FinReg, Value};
use serde_json::json;

/// Shift indicators shown next to the display
pub fn indicators(calc: &Calculator) -> String {
    let flags = calc.modal_flags();
    let mut out = Vec::new();
    if flags.f {
        out.push("[f]".yellow().bold().to_string());
    }
    if flags.g {
        out.push("[g]".blue().bold().to_string());
    }
    if flags.sto {
        out.push("[STO]".dimmed().to_string());
    }
    if flags.rcl {
        out.push("[RCL]".dimmed().to_string());
    }
    out.join(" ")
}

/// One line: indicators and the display text
pub fn display_line(calc: &Calculator) -> String {
    let text = calc.display();
    let text = if calc.stack_snapshot().x.is_error() && !calc.is_entering() {
        text.red().bold().to_string()
    } else {
        text.bright_white().bold().to_string()
    };
    let indicators = indicators(calc);
    if indicators.is_empty() {
        text
    } else {
        format!("{} {}", indicators, text)
    }
}

fn cell(value: Value, places: u8) -> String {
    match value.number() {
        Some(number) => format_decimal(number, places),
        None => "Error".red().to_string(),
    }
}

pub fn print_stack(calc: &Calculator) {
    let places = calc.display_places();
    let snap = calc.stack_snapshot();
    for (name, value) in [("T", snap.t), ("Z", snap.z), ("Y", snap.y), ("X", snap.x)] {
        println!("  {} {:>24}", name.bright_cyan(), cell(value, places));
    }
}

pub fn print_registers(calc: &Calculator) {
    let places = calc.display_places();

    println!("{}", "Storage".bright_cyan().bold());
    for (index, value) in calc.storage_registers().iter() {
        println!("  R{} {:>24}", index, cell(value, places));
    }

    println!("{}", "Financial".bright_cyan().bold());
    for reg in FinReg::ALL {
        println!("  {:<3} {:>23}", reg.label(), cell(calc.financial_register(reg), places));
    }

    let stats = calc.statistics();
    println!("{}", "Statistics".bright_cyan().bold());
    for (name, value) in [
        ("n", stats.n),
        ("Σx", stats.sum_x),
        ("Σx²", stats.sum_x2),
        ("Σy", stats.sum_y),
        ("Σy²", stats.sum_y2),
        ("Σxy", stats.sum_xy),
    ] {
        println!("  {:<3} {:>23}", name, cell(value, places));
    }
}

/// Machine readable state for `--json`
pub fn snapshot_json(calc: &Calculator) -> serde_json::Value {
    json!({
        "display": calc.display(),
        "flags": calc.modal_flags(),
        "stack": calc.stack_snapshot(),
        "storage": calc.storage_registers(),
        "financial": calc.financial_registers(),
        "statistics": calc.statistics(),
        "decimal_places": calc.display_places(),
    })
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn calc_after(keys: &[&str]) -> Calculator {
        let mut calc = Calculator::new();
        for key in keys {
            calc.press_key(key);
        }
        calc
    }

    #[test]
    fn test_indicators() {
        colored::control::set_override(false);
        assert_eq!(indicators(&calc_after(&["f"])), "[f]");
        assert_eq!(indicators(&calc_after(&["g"])), "[g]");
        assert_eq!(indicators(&calc_after(&["STO"])), "[STO]");
        assert_eq!(indicators(&calc_after(&[])), "");
    }

    #[test]
    fn test_cell_formats_error() {
        colored::control::set_override(false);
        assert_eq!(cell(Value::Error, 2), "Error");
        assert_eq!(cell(Value::from(1234_i64), 2), "1.234,00");
    }

    #[test]
    fn test_snapshot_json() {
        let calc = calc_after(&["3", "ENTER", "4", "+"]);
        let json = snapshot_json(&calc);
        assert_eq!(json["display"], "7,00");
        assert_eq!(json["stack"]["x"], "7");
        assert_eq!(json["financial"]["pv"], "0");
        assert_eq!(json["decimal_places"], 2);
        assert_eq!(json["flags"]["g"], false);
    }
}
