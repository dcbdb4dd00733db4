//! hp12c-engine - RPN financial calculator engine
//!
//! Interprets discrete key tokens the way an HP-12C does and exposes the
//! resulting display text and state. Presentation (windows, buttons,
//! keyboard scan codes) lives outside this crate.
//!
//! # Features
//!
//! - **RPN stack**: four levels, lift on push, T duplicated on pop
//! - **Keypad entry**: mantissa, decimal separator, EEX exponent, CHS
//! - **Shift keys**: f and g legends resolved through static key tables
//! - **Registers**: R0..R9, the five TVM registers, six statistics sums
//! - **Financial**: FV/PV/PMT/n in closed form, i by the secant method
//! - **Depreciation**: SL, SOYD, DB
//! - **Dates**: ΔDYS and DATE on `DD.MMYYYY` numbers
//!
//! # Example
//!
//! ```rust
//! use hp12c_engine::{Calculator, FinReg};
//!
//! let mut calc = Calculator::new();
//!
//! // 12 n  1 i  1000 CHS PV  FV
//! let keys = ["1", "2", "n", "1", "i", "1", "0", "0", "0", "CHS", "PV", "FV"];
//! for key in keys {
//!     calc.press_key(key);
//! }
//! assert_eq!(calc.display(), "1.126,83");
//! assert_eq!(calc.financial_register(FinReg::Fv), calc.stack_snapshot().x);
//!
//! // invalid computations put Error in X instead of failing
//! for key in ["5", "ENTER", "0", "÷"] {
//!     calc.press_key(key);
//! }
//! assert_eq!(calc.display(), "Error");
//! ```
//!
//! # Keys
//!
//! | Key | f | g |
//! |-----|---|---|
//! | `y^x` | `√x` | |
//! | `1/x` | `%` | |
//! | `R↓` | `x<>y` | |
//! | `STO` | `RCL` | |
//! | `8` | | `x̄` |
//! | `9` | | `s` |
//! | `÷` | | `DB` |
//! | `Σ+` | `CLΣ` | |
//! | `EEX` | `ΔDYS` | |
//! | `CHS` | `DATE` | |
//!
//! f followed by a digit sets the number of decimal places shown. Every
//! function can also be pressed directly by its legend (`"SL"`, `"ΔDYS"`).

pub mod calculator;
pub mod config;
pub mod dates;
pub mod depreciation;
pub mod display;
pub mod entry;
pub mod error;
pub mod keys;
pub mod registers;
pub mod stack;
pub mod statistics;
pub mod tvm;
pub mod value;

// Re-exports for convenience
pub use calculator::{Calculator, ModalFlags};
pub use config::{DisplayConfig, EngineConfig, SolverConfig};
pub use error::{EngineError, Result};
pub use keys::Function;
pub use registers::FinReg;
pub use stack::StackSnapshot;
pub use statistics::StatRegisters;
pub use value::Value;
