//! Storage and financial register banks
//!
//! Neither bank is touched by ON: like the real calculator, memory survives
//! a reset of the stack.

use serde::Serialize;
use std::fmt;

use crate::value::Value;

pub const STORAGE_REGISTERS: usize = 10;

/// R0..R9, written by STO and read by RCL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StorageRegisters {
    regs: [Value; STORAGE_REGISTERS],
}

impl StorageRegisters {
    pub fn get(&self, index: usize) -> Option<Value> {
        self.regs.get(index).copied()
    }

    /// Returns false for an index outside 0..=9
    pub fn set(&mut self, index: usize, value: Value) -> bool {
        match self.regs.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            },
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Value)> + '_ {
        self.regs.iter().copied().enumerate()
    }
}

/// The five time-value-of-money registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FinReg {
    N,
    I,
    Pv,
    Pmt,
    Fv,
}

impl FinReg {
    pub const ALL: [FinReg; 5] = [FinReg::N, FinReg::I, FinReg::Pv, FinReg::Pmt, FinReg::Fv];

    /// Keycap legend
    pub fn label(self) -> &'static str {
        match self {
            FinReg::N => "n",
            FinReg::I => "i",
            FinReg::Pv => "PV",
            FinReg::Pmt => "PMT",
            FinReg::Fv => "FV",
        }
    }
}

impl fmt::Display for FinReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// n, i (percent per period), PV, PMT, FV
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FinancialRegisters {
    pub n: Value,
    pub i: Value,
    pub pv: Value,
    pub pmt: Value,
    pub fv: Value,
}

impl FinancialRegisters {
    pub fn get(&self, reg: FinReg) -> Value {
        match reg {
            FinReg::N => self.n,
            FinReg::I => self.i,
            FinReg::Pv => self.pv,
            FinReg::Pmt => self.pmt,
            FinReg::Fv => self.fv,
        }
    }

    pub fn set(&mut self, reg: FinReg, value: Value) {
        let slot = match reg {
            FinReg::N => &mut self.n,
            FinReg::I => &mut self.i,
            FinReg::Pv => &mut self.pv,
            FinReg::Pmt => &mut self.pmt,
            FinReg::Fv => &mut self.fv,
        };
        *slot = value;
    }
}
