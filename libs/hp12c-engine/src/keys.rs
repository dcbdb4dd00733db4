//! Keyboard layout and key resolution
//!
//! Every key token names either a [`Function`] the engine performs or a legend
//! printed on the keyboard that has no behaviour yet. The f and g tables
//! follow the physical keyboard: the shifted legend is looked up by the
//! primary legend of the key it is printed on.

use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, Result};
use crate::registers::FinReg;

/// An operation the engine can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Digit(u8),
    DecimalPoint,
    Enter,
    Add,
    Subtract,
    Multiply,
    Divide,
    ChangeSign,
    On,
    ShiftF,
    ShiftG,
    ClearX,
    SwapXY,
    RollDown,
    Power,
    Reciprocal,
    SquareRoot,
    Percent,
    PercentChange,
    Store,
    Recall,
    SigmaPlus,
    ClearSigma,
    Mean,
    StdDev,
    StraightLine,
    Soyd,
    DecliningBalance,
    Eex,
    DeltaDays,
    Date,
    Financial(FinReg),
}

/// Legend to function, excluding digits and financial registers
const FUNCTION_LABELS: &[(&str, Function)] = &[
    (",", Function::DecimalPoint),
    (".", Function::DecimalPoint),
    ("ENTER", Function::Enter),
    ("+", Function::Add),
    ("-", Function::Subtract),
    ("×", Function::Multiply),
    ("÷", Function::Divide),
    ("CHS", Function::ChangeSign),
    ("ON", Function::On),
    ("f", Function::ShiftF),
    ("g", Function::ShiftG),
    ("CLx", Function::ClearX),
    ("x<>y", Function::SwapXY),
    ("R↓", Function::RollDown),
    ("y^x", Function::Power),
    ("1/x", Function::Reciprocal),
    ("√x", Function::SquareRoot),
    ("%", Function::Percent),
    ("Δ%", Function::PercentChange),
    ("STO", Function::Store),
    ("RCL", Function::Recall),
    ("Σ+", Function::SigmaPlus),
    ("CLΣ", Function::ClearSigma),
    ("x̄", Function::Mean),
    ("s", Function::StdDev),
    ("SL", Function::StraightLine),
    ("SOYD", Function::Soyd),
    ("DB", Function::DecliningBalance),
    ("EEX", Function::Eex),
    ("ΔDYS", Function::DeltaDays),
    ("DATE", Function::Date),
];

/// Legends printed on the keyboard whose functions are not available
pub const UNASSIGNED_LABELS: &[&str] = &[
    "12x", "12÷", "CF0", "CFj", "Nj", "FRAC", "SST", "BST", "INPUT", "AMORT", "INT", "NPV", "IRR",
    "RND", "e^x", "LN", "INTG", "PSE", "GTO", "PREFIX", "YTM", "MEM", "R/S", "PRICE", "FIN",
];

impl Function {
    /// Keycap legend
    pub fn label(self) -> &'static str {
        match self {
            Function::Digit(d) => DIGIT_LABELS.get(usize::from(d)).copied().unwrap_or("?"),
            Function::Financial(reg) => reg.label(),
            other => FUNCTION_LABELS
                .iter()
                .find(|(_, f)| *f == other)
                .map_or("?", |(label, _)| label),
        }
    }
}

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Function {
    type Err = EngineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(d) = digit(s) {
            return Ok(Function::Digit(d));
        }
        if let Some(reg) = FinReg::ALL.into_iter().find(|r| r.label() == s) {
            return Ok(Function::Financial(reg));
        }
        if let Some((_, function)) = FUNCTION_LABELS.iter().find(|(label, _)| *label == s) {
            return Ok(*function);
        }
        if UNASSIGNED_LABELS.contains(&s) {
            return Err(EngineError::unimplemented(s));
        }
        Err(EngineError::unknown_key(s))
    }
}

/// Every legend that resolves to a function, for completion in front ends
pub fn legends() -> impl Iterator<Item = &'static str> {
    FUNCTION_LABELS
        .iter()
        .map(|(label, _)| *label)
        .chain(FinReg::ALL.into_iter().map(FinReg::label))
}

/// A single ASCII digit token
pub fn digit(token: &str) -> Option<u8> {
    match token.as_bytes() {
        [b @ b'0'..=b'9'] => Some(b - b'0'),
        _ => None,
    }
}

/// What a shifted key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Run(Function),
    Unassigned(&'static str),
}

/// Orange legends, looked up by the key's primary legend
pub fn f_binding(key: Function) -> Option<Binding> {
    use Binding::{Run, Unassigned};

    let binding = match key {
        Function::Financial(FinReg::N) => Unassigned("12x"),
        Function::Financial(FinReg::I) => Unassigned("12÷"),
        Function::Financial(FinReg::Pv) => Unassigned("CF0"),
        Function::Financial(FinReg::Pmt) => Unassigned("CFj"),
        Function::Financial(FinReg::Fv) => Unassigned("Nj"),
        Function::Power => Run(Function::SquareRoot),
        Function::Reciprocal => Run(Function::Percent),
        Function::PercentChange => Unassigned("FRAC"),
        Function::RollDown => Run(Function::SwapXY),
        Function::Store => Run(Function::Recall),
        Function::Digit(8) => Run(Function::StraightLine),
        Function::Digit(9) => Run(Function::Soyd),
        Function::SigmaPlus => Run(Function::ClearSigma),
        Function::Eex => Run(Function::DeltaDays),
        Function::ChangeSign => Run(Function::Date),
        Function::Enter => Unassigned("INPUT"),
        _ => return None,
    };
    Some(binding)
}

/// Blue legends, looked up by the key's primary legend
pub fn g_binding(key: Function) -> Option<Binding> {
    use Binding::{Run, Unassigned};

    let binding = match key {
        Function::Financial(FinReg::N) => Unassigned("AMORT"),
        Function::Financial(FinReg::I) => Unassigned("INT"),
        Function::Financial(FinReg::Pv) => Unassigned("NPV"),
        Function::Financial(FinReg::Pmt) => Unassigned("IRR"),
        Function::Financial(FinReg::Fv) => Unassigned("RND"),
        Function::Power => Unassigned("e^x"),
        Function::Reciprocal => Unassigned("LN"),
        Function::PercentChange => Unassigned("INTG"),
        Function::RollDown => Unassigned("PSE"),
        Function::Store => Unassigned("PREFIX"),
        Function::Digit(7) => Unassigned("YTM"),
        Function::Digit(8) => Run(Function::Mean),
        Function::Digit(9) => Run(Function::StdDev),
        Function::Divide => Run(Function::DecliningBalance),
        Function::SigmaPlus => Unassigned("MEM"),
        Function::Eex => Unassigned("R/S"),
        Function::ChangeSign => Unassigned("PRICE"),
        Function::Enter => Unassigned("FIN"),
        _ => return None,
    };
    Some(binding)
}

/// Active shift key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shift {
    #[default]
    None,
    F,
    G,
}

/// Resolve a key token under a shift
///
/// `Ok(None)` is a shifted key with nothing printed above or below it.
/// `SST` has no primary function but still carries shifted legends.
pub fn resolve(token: &str, shift: Shift) -> Result<Option<Function>> {
    let lookup = match shift {
        Shift::None => return token.parse().map(Some),
        Shift::F => f_binding,
        Shift::G => g_binding,
    };
    let binding = if token == "SST" {
        Some(Binding::Unassigned(if shift == Shift::F { "BST" } else { "GTO" }))
    } else {
        lookup(token.parse()?)
    };
    match binding {
        Some(Binding::Run(function)) => Ok(Some(function)),
        Some(Binding::Unassigned(label)) => Err(EngineError::unimplemented(label)),
        None => Ok(None),
    }
}
