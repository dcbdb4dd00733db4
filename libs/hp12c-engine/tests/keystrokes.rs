//! Keystroke Integration Tests
//!
//! Drives the calculator exclusively through key tokens, the way a
//! presentation layer would, and checks the display and queries.

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use hp12c_engine::{Calculator, EngineConfig, FinReg, Value};
use rust_decimal_macros::dec;

/// Press keys; multi-character numbers are typed one digit at a time
fn press(calc: &mut Calculator, keys: &[&str]) {
    for key in keys {
        if key.len() > 1 && key.chars().all(|c| c.is_ascii_digit() || c == ',') {
            for c in key.chars() {
                calc.press_key(&c.to_string());
            }
        } else {
            calc.press_key(key);
        }
    }
}

fn run(keys: &[&str]) -> Calculator {
    let mut calc = Calculator::new();
    press(&mut calc, keys);
    calc
}

// ============================================================================
// Stack and arithmetic
// ============================================================================

#[test]
fn test_add_after_enter() {
    let calc = run(&["3", "ENTER", "4", "+"]);
    let snap = calc.stack_snapshot();
    assert_eq!(snap.x, Value::from(dec!(7)));
    assert_eq!(snap.y, Value::from(dec!(3)));
    assert_eq!(calc.display(), "7,00");
}

#[test]
fn test_roll_down_four_times_restores_stack() {
    let mut calc = run(&["1", "STO", "0", "2", "STO", "0", "3", "STO", "0", "4", "STO", "0"]);
    let before = calc.stack_snapshot();
    assert_eq!(before.x, Value::from(dec!(4)));
    assert_eq!(before.t, Value::from(dec!(1)));

    press(&mut calc, &["R↓", "R↓", "R↓", "R↓"]);
    assert_eq!(calc.stack_snapshot(), before);
}

#[test]
fn test_division_by_zero_shows_error_and_recovers() {
    let mut calc = run(&["5", "ENTER", "0", "÷"]);
    assert!(calc.stack_snapshot().x.is_error());
    assert_eq!(calc.display(), "Error");
    // both operands were popped; Y now holds the old T
    assert_eq!(calc.stack_snapshot().y, Value::ZERO);

    press(&mut calc, &["CLx", "2", "+"]);
    assert_eq!(calc.stack_snapshot().x, Value::from(dec!(2)));
}

#[test]
fn test_finalize_is_idempotent() {
    let mut calc = run(&["1", "2", "ENTER"]);
    let after_enter = calc.stack_snapshot();
    // the literal is already committed: swapping twice must not push it again
    press(&mut calc, &["x<>y", "x<>y"]);
    assert_eq!(calc.stack_snapshot(), after_enter);
}

// ============================================================================
// Entry and display
// ============================================================================

#[test]
fn test_entry_display_groups_digits() {
    let mut calc = run(&["1234567", ","]);
    assert_eq!(calc.display(), "1.234.567,");
    press(&mut calc, &["8", "9"]);
    assert_eq!(calc.display(), "1.234.567,89");
    press(&mut calc, &["ENTER"]);
    assert_eq!(calc.display(), "1.234.567,89");
}

#[test]
fn test_leading_separator_and_dot_key() {
    let calc = run(&["."]);
    assert_eq!(calc.display(), "0,");
    let calc = run(&[".", "5", "ENTER"]);
    assert_eq!(calc.stack_snapshot().x, Value::from(dec!(0.5)));
}

#[test]
fn test_exponent_entry() {
    let mut calc = run(&["EEX"]);
    assert_eq!(calc.display(), "0 00");
    press(&mut calc, &["CLx", "2", "5", "EEX", "2", "CHS"]);
    assert_eq!(calc.display(), "25 -02");
    press(&mut calc, &["ENTER"]);
    assert_eq!(calc.stack_snapshot().x, Value::from(dec!(0.25)));
}

#[test]
fn test_exponent_digits_follow_seeded_zero() {
    let mut calc = run(&["1", "EEX", "1", "2"]);
    assert_eq!(calc.display(), "1 01");
    press(&mut calc, &["ENTER"]);
    assert_eq!(calc.stack_snapshot().x, Value::from(dec!(10)));
}

#[test]
fn test_display_places_from_config() {
    let mut config = EngineConfig::default();
    config.display.decimal_places = 0;
    let mut calc = Calculator::with_config(config);
    press(&mut calc, &["2", "ENTER", "3", "÷"]);
    assert_eq!(calc.display(), "1");
    press(&mut calc, &["f", "9"]);
    assert_eq!(calc.display(), "0,666666667");
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn test_two_variable_statistics() {
    let mut calc = run(&["f", "Σ+", "3", "ENTER", "4", "Σ+", "2", "ENTER", "6", "Σ+"]);
    let stats = calc.statistics();
    assert_eq!(stats.n, Value::from(dec!(2)));
    assert_eq!(stats.sum_x, Value::from(dec!(10)));
    assert_eq!(stats.sum_y, Value::from(dec!(5)));
    assert_eq!(stats.mean_y(), Value::from(dec!(2.5)));
    assert_eq!(calc.display(), "2,00");

    press(&mut calc, &["g", "8"]);
    assert_eq!(calc.stack_snapshot().x, Value::from(dec!(5)));
}

// ============================================================================
// Depreciation, TVM and dates
// ============================================================================

#[test]
fn test_straight_line_key() {
    let calc = run(&["10000", "STO", "0", "1000", "STO", "0", "5", "SL"]);
    assert_eq!(calc.stack_snapshot().x, Value::from(dec!(1800)));
    assert_eq!(calc.display(), "1.800,00");
}

#[test]
fn test_compound_interest_future_value() {
    let calc = run(&["12", "n", "1", "i", "1000", "CHS", "PV", "0", "PMT", "FV"]);
    let fv = calc.financial_register(FinReg::Fv).number().unwrap();
    assert!((fv - dec!(1126.825030131969720661201)).abs() < dec!(0.000001));
    assert_eq!(calc.display(), "1.126,83");
}

#[test]
fn test_solve_rate_from_registers() {
    let mut calc = run(&["12", "n", "1", "i", "1000", "CHS", "PV", "0", "PMT", "FV"]);
    // clear i by storing 0, then solve for it
    press(&mut calc, &["0", "i", "CLx", "i"]);
    let i = calc.financial_register(FinReg::I).number().unwrap();
    assert!((i - dec!(1)).abs() < dec!(0.000001), "i = {}", i);
    assert_eq!(calc.display(), "1,00");
}

#[test]
fn test_days_between_leap_year() {
    let mut calc = run(&["1,012020", "ENTER", "1,012021", "f", "EEX"]);
    assert_eq!(calc.stack_snapshot().x, Value::from(dec!(366)));

    press(&mut calc, &["ON", "1,012021", "ENTER", "1,012020", "ΔDYS"]);
    assert_eq!(calc.stack_snapshot().x, Value::from(dec!(-366)));
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_on_keeps_storage_and_financial_registers() {
    let mut calc = run(&["42", "STO", "7", "360", "n", "3", "ENTER", "4", "Σ+", "f", "4"]);
    press(&mut calc, &["ON"]);

    assert_eq!(calc.storage_register(7), Some(Value::from(dec!(42))));
    assert_eq!(calc.financial_register(FinReg::N), Value::from(dec!(360)));
    assert_eq!(calc.statistics().n, Value::ZERO);
    assert_eq!(calc.stack_snapshot().x, Value::ZERO);
    assert_eq!(calc.display_places(), 2);
    assert_eq!(calc.display(), "0,00");
}

#[test]
fn test_snapshot_serializes_for_presentation() {
    let calc = run(&["3", "ENTER", "4", "+"]);
    let json = serde_json::to_value(calc.stack_snapshot()).unwrap();
    assert_eq!(json["x"], "7");
    assert_eq!(json["y"], "3");
    let flags = serde_json::to_value(calc.modal_flags()).unwrap();
    assert_eq!(flags["f"], false);
}
