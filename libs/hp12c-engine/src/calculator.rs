//! Calculator - key-driven RPN engine
//!
//! Owns every piece of calculator state and interprets one key token at a
//! time. Key resolution order:
//! 1. STO or RCL pending and a digit pressed: store into / recall from that register
//! 2. any other key cancels a pending STO or RCL
//! 3. f pending and a digit pressed: set the number of display places
//! 4. f or g pending: run the shifted legend of the key
//! 5. otherwise run the key's primary function

use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::dates;
use crate::depreciation;
use crate::display::format_value;
use crate::entry::EntryBuffer;
use crate::error::{EngineError, Result};
use crate::keys::{self, Function, Shift};
use crate::registers::{FinReg, FinancialRegisters, StorageRegisters};
use crate::stack::{Stack, StackSnapshot};
use crate::statistics::StatRegisters;
use crate::tvm;
use crate::value::Value;

/// Pending prefix keys
///
/// STO, RCL and g each clear the other three when pressed; f clears only g.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModalFlags {
    pub f: bool,
    pub g: bool,
    pub sto: bool,
    pub rcl: bool,
}

/// Financial RPN calculator
///
/// # Example
/// ```
/// use hp12c_engine::Calculator;
///
/// let mut calc = Calculator::new();
/// for key in ["3", "ENTER", "4", "+"] {
///     calc.press_key(key);
/// }
/// assert_eq!(calc.display(), "7,00");
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    config: EngineConfig,
    stack: Stack,
    entry: EntryBuffer,
    flags: ModalFlags,
    storage: StorageRegisters,
    financial: FinancialRegisters,
    stats: StatRegisters,
    display_places: u8,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create a calculator with factory settings
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a calculator with the given display and solver settings
    pub fn with_config(config: EngineConfig) -> Self {
        let display_places = config.display.decimal_places;
        Self {
            config,
            stack: Stack::new(),
            entry: EntryBuffer::new(),
            flags: ModalFlags::default(),
            storage: StorageRegisters::default(),
            financial: FinancialRegisters::default(),
            stats: StatRegisters::default(),
            display_places,
        }
    }

    /// Press a key; unknown or unavailable keys are logged and ignored
    pub fn press_key(&mut self, token: &str) {
        if let Err(e) = self.try_press_key(token) {
            match e {
                EngineError::Unimplemented(label) => warn!(key = token, function = %label, "not implemented"),
                other => warn!(key = token, error = %other, "key ignored"),
            }
        }
    }

    /// Press a key, reporting tokens the engine cannot act on
    ///
    /// Modal flags are consumed even when an error is returned, exactly as
    /// with [`press_key`](Self::press_key).
    pub fn try_press_key(&mut self, token: &str) -> Result<()> {
        if let Some(register) = keys::digit(token) {
            if self.flags.sto {
                self.flags.sto = false;
                self.store(usize::from(register));
                return Ok(());
            }
            if self.flags.rcl {
                self.flags.rcl = false;
                self.recall(usize::from(register));
                return Ok(());
            }
        }
        self.flags.sto = false;
        self.flags.rcl = false;

        let shift = if self.flags.f {
            Shift::F
        } else if self.flags.g {
            Shift::G
        } else {
            Shift::None
        };

        if shift == Shift::F {
            self.flags.f = false;
            if let Some(places) = keys::digit(token) {
                self.set_display_places(places);
                return Ok(());
            }
        }
        if shift == Shift::G {
            self.flags.g = false;
        }

        match keys::resolve(token, shift)? {
            Some(function) => {
                debug!(key = token, ?shift, %function, "key resolved");
                self.execute(function);
            },
            None => debug!(key = token, ?shift, "no shifted function"),
        }
        Ok(())
    }

    /// Text shown on the display
    pub fn display(&self) -> String {
        self.entry
            .render()
            .unwrap_or_else(|| format_value(self.stack.x(), self.display_places))
    }

    pub fn f_active(&self) -> bool {
        self.flags.f
    }

    pub fn g_active(&self) -> bool {
        self.flags.g
    }

    pub fn modal_flags(&self) -> ModalFlags {
        self.flags
    }

    /// True while a literal is being typed
    pub fn is_entering(&self) -> bool {
        self.entry.is_active()
    }

    pub fn stack_snapshot(&self) -> StackSnapshot {
        self.stack.snapshot()
    }

    pub fn storage_register(&self, index: usize) -> Option<Value> {
        self.storage.get(index)
    }

    pub fn storage_registers(&self) -> &StorageRegisters {
        &self.storage
    }

    pub fn financial_register(&self, reg: FinReg) -> Value {
        self.financial.get(reg)
    }

    pub fn financial_registers(&self) -> &FinancialRegisters {
        &self.financial
    }

    pub fn statistics(&self) -> &StatRegisters {
        &self.stats
    }

    pub fn display_places(&self) -> u8 {
        self.display_places
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn execute(&mut self, function: Function) {
        match function {
            Function::Digit(d) => self.entry.push_digit(d),
            Function::DecimalPoint => self.entry.push_separator(),
            Function::Eex => self.entry.begin_exponent(),
            Function::Enter => {
                self.finalize();
                self.stack.push(self.stack.x());
            },
            Function::Add => self.binary(|y, x| y + x),
            Function::Subtract => self.binary(|y, x| y - x),
            Function::Multiply => self.binary(|y, x| y * x),
            Function::Divide => self.divide(),
            Function::Power => self.binary(power),
            Function::Percent => self.binary(|y, x| y * (x / Value::from(Decimal::ONE_HUNDRED))),
            Function::PercentChange => self.percent_change(),
            Function::ChangeSign => {
                if !self.entry.change_sign() {
                    self.stack.set_x(-self.stack.x());
                }
            },
            Function::ClearX => {
                if self.entry.is_active() {
                    self.entry.abandon();
                } else {
                    self.stack.set_x(Value::ZERO);
                }
            },
            Function::SwapXY => {
                self.finalize();
                self.stack.swap_xy();
            },
            Function::RollDown => {
                self.finalize();
                self.stack.roll_down();
            },
            Function::Reciprocal => {
                self.finalize();
                let x = self.stack.x();
                let result = if x.is_zero() { Value::Error } else { Value::from(Decimal::ONE) / x };
                self.stack.set_x(result);
            },
            Function::SquareRoot => {
                self.finalize();
                let root = self.stack.x().and_then(|x| x.sqrt());
                self.stack.set_x(root);
            },
            Function::On => self.reset(),
            Function::ShiftF => {
                self.flags.f = true;
                self.flags.g = false;
            },
            Function::ShiftG => {
                self.flags = ModalFlags {
                    g: true,
                    ..ModalFlags::default()
                };
            },
            Function::Store => {
                self.flags = ModalFlags {
                    sto: true,
                    ..ModalFlags::default()
                };
            },
            Function::Recall => {
                self.flags = ModalFlags {
                    rcl: true,
                    ..ModalFlags::default()
                };
            },
            Function::SigmaPlus => {
                self.finalize();
                self.stats.accumulate(self.stack.x(), self.stack.y());
                self.stack.push(self.stats.n);
            },
            Function::ClearSigma => {
                self.stats.clear();
                debug!("statistics registers cleared");
            },
            Function::Mean => {
                self.finalize();
                let mean = self.stats.mean_x();
                self.push_or_fail(mean);
            },
            Function::StdDev => {
                self.finalize();
                let s = self.stats.std_dev_x();
                self.push_or_fail(s);
            },
            Function::StraightLine => {
                self.finalize();
                let [life, salvage, cost] = self.pop_n();
                self.push_or_fail(depreciation::straight_line(cost, salvage, life));
            },
            Function::Soyd => {
                self.finalize();
                let [period, life, salvage, cost] = self.pop_n();
                self.push_or_fail(depreciation::sum_of_years_digits(cost, salvage, life, period));
            },
            Function::DecliningBalance => {
                self.finalize();
                let [rate, period, life, salvage, cost] = self.pop_n();
                self.push_or_fail(depreciation::declining_balance(cost, salvage, life, period, rate));
            },
            Function::DeltaDays => self.delta_days(),
            Function::Date => self.date_offset(),
            Function::Financial(reg) => self.financial_key(reg),
        }
    }

    /// Commit a literal being typed, lifting the stack
    fn finalize(&mut self) {
        match self.entry.take() {
            None => {},
            Some(Ok(number)) => self.stack.push(Value::from(number)),
            Some(Err(e)) => {
                debug!(error = %e, "entry rejected");
                self.stack.set_x(Value::Error);
            },
        }
    }

    /// Pop X and Y, push `op(y, x)`
    fn binary(&mut self, op: impl FnOnce(Value, Value) -> Value) {
        self.finalize();
        let x = self.stack.pop();
        let y = self.stack.pop();
        self.stack.push(op(y, x));
    }

    /// Pop `N` values, X first
    fn pop_n<const N: usize>(&mut self) -> [Value; N] {
        std::array::from_fn(|_| self.stack.pop())
    }

    /// Push a result, or put `Error` in X without lifting
    fn push_or_fail(&mut self, value: Value) {
        if value.is_error() {
            self.stack.set_x(Value::Error);
        } else {
            self.stack.push(value);
        }
    }

    fn divide(&mut self) {
        self.finalize();
        let [x, y] = self.pop_n();
        if x.is_zero() {
            debug!("division by zero");
            self.stack.set_x(Value::Error);
            return;
        }
        self.stack.push(y / x);
    }

    fn percent_change(&mut self) {
        self.finalize();
        let [x, y] = self.pop_n();
        if y.is_zero() {
            self.stack.set_x(Value::Error);
            return;
        }
        self.stack.push((x - y) / y * Value::from(Decimal::ONE_HUNDRED));
    }

    /// ΔDYS: days from the date in Y to the date in X
    fn delta_days(&mut self) {
        self.finalize();
        let [to, from] = self.pop_n();
        match (dates::decode(from), dates::decode(to)) {
            (Ok(from), Ok(to)) => self.stack.push(Value::from(dates::days_between(from, to))),
            (Err(e), _) | (_, Err(e)) => {
                debug!(error = %e, "ΔDYS");
                self.stack.set_x(Value::Error);
            },
        }
    }

    /// DATE: the date in Y shifted by X days
    fn date_offset(&mut self) {
        self.finalize();
        let [days, start] = self.pop_n();
        let shifted = match (dates::decode(start), days.number()) {
            (Ok(start), Some(days)) => dates::add_days(start, days),
            (Err(e), _) => {
                debug!(error = %e, "DATE");
                None
            },
            (Ok(_), None) => None,
        };
        match shifted {
            Some(date) => self.stack.push(Value::from(dates::encode(date))),
            None => self.stack.set_x(Value::Error),
        }
    }

    /// n, i, PV, PMT, FV: store a freshly typed literal, otherwise solve
    ///
    /// A degenerate n or PMT only puts `Error` in X. Every other result,
    /// `Error` included, overwrites both the register and X.
    fn financial_key(&mut self, reg: FinReg) {
        let was_entering = self.entry.is_active();
        self.finalize();

        if was_entering {
            let value = self.stack.x();
            self.financial.set(reg, value);
            info!(register = %reg, %value, "financial register stored");
            return;
        }

        let result = tvm::solve(reg, &self.financial, &self.config.solver);
        if result.is_error() && matches!(reg, FinReg::N | FinReg::Pmt) {
            self.stack.set_x(Value::Error);
            return;
        }
        self.financial.set(reg, result);
        self.stack.set_x(result);
        info!(register = %reg, value = %result, "financial register computed");
    }

    fn store(&mut self, index: usize) {
        self.finalize();
        let value = self.stack.x();
        if self.storage.set(index, value) {
            info!(register = index, %value, "STO");
        }
    }

    fn recall(&mut self, index: usize) {
        self.finalize();
        if let Some(value) = self.storage.get(index) {
            self.stack.push(value);
            info!(register = index, %value, "RCL");
        }
    }

    fn set_display_places(&mut self, places: u8) {
        if places <= crate::display::MAX_DECIMAL_PLACES {
            self.display_places = places;
            debug!(places, "display format");
        }
    }

    /// ON: clear the stack, entry, prefixes and statistics; memory survives
    fn reset(&mut self) {
        self.stack.clear();
        self.entry.abandon();
        self.flags = ModalFlags::default();
        self.stats.clear();
        self.display_places = self.config.display.decimal_places;
        debug!("reset");
    }
}

/// y^x; zero to a non-positive power and a negative base with a fractional
/// exponent have no value
fn power(base: Value, exponent: Value) -> Value {
    base.zip_with(exponent, |b, e| {
        if b.is_zero() && e <= Decimal::ZERO {
            return None;
        }
        if b.is_sign_negative() && !e.fract().is_zero() {
            return None;
        }
        b.checked_powd(e)
    })
}
