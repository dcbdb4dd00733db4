//! Time value of money
//!
//! Closed forms for FV, PV, PMT and n; the periodic rate is found with the
//! secant method. The rate register holds a percentage, every formula here
//! works with the fraction `i / 100`.
//!
//! Sign convention: money paid out is negative, money received is positive,
//! so `n=12 i=1 PV=-1000 PMT=0` computes a positive FV.

use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

use crate::config::SolverConfig;
use crate::registers::{FinReg, FinancialRegisters};
use crate::value::Value;

/// Snapshot of the five registers with the rate still in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TvmInputs {
    pub n: Decimal,
    pub i_percent: Decimal,
    pub pv: Decimal,
    pub pmt: Decimal,
    pub fv: Decimal,
}

impl TvmInputs {
    /// `None` when any register holds `Error`
    pub fn from_registers(regs: &FinancialRegisters) -> Option<Self> {
        Some(Self {
            n: regs.n.number()?,
            i_percent: regs.i.number()?,
            pv: regs.pv.number()?,
            pmt: regs.pmt.number()?,
            fv: regs.fv.number()?,
        })
    }

    fn rate(&self) -> Option<Decimal> {
        self.i_percent.checked_div(Decimal::ONE_HUNDRED)
    }
}

/// Compute `target` from the other four registers
pub fn solve(target: FinReg, regs: &FinancialRegisters, solver: &SolverConfig) -> Value {
    let Some(inputs) = TvmInputs::from_registers(regs) else {
        debug!(register = %target, "financial register holds Error");
        return Value::Error;
    };
    let result = match target {
        FinReg::N => periods(&inputs),
        FinReg::I => rate(&inputs, solver),
        FinReg::Pv => present_value(&inputs),
        FinReg::Pmt => payment(&inputs),
        FinReg::Fv => future_value(&inputs),
    };
    if result.is_none() {
        debug!(register = %target, ?inputs, "no TVM solution");
    }
    result.into()
}

/// `(1+i)^n`; a negative base has no real fractional power
fn growth(i: Decimal, n: Decimal) -> Option<Decimal> {
    let base = Decimal::ONE.checked_add(i)?;
    if base.is_sign_negative() && !base.is_zero() && !n.fract().is_zero() {
        return None;
    }
    base.checked_powd(n)
}

/// `((1+i)^n − 1) / i`
fn annuity_factor(i: Decimal, growth: Decimal) -> Option<Decimal> {
    growth.checked_sub(Decimal::ONE)?.checked_div(i)
}

pub fn future_value(t: &TvmInputs) -> Option<Decimal> {
    let i = t.rate()?;
    if i.is_zero() {
        return Some(-t.pv.checked_add(t.pmt.checked_mul(t.n)?)?);
    }
    let g = growth(i, t.n)?;
    let total = t.pv.checked_mul(g)?.checked_add(t.pmt.checked_mul(annuity_factor(i, g)?)?)?;
    Some(-total)
}

pub fn present_value(t: &TvmInputs) -> Option<Decimal> {
    let i = t.rate()?;
    if i.is_zero() {
        return Some(-t.fv.checked_add(t.pmt.checked_mul(t.n)?)?);
    }
    let g = growth(i, t.n)?;
    let total = t.fv.checked_add(t.pmt.checked_mul(annuity_factor(i, g)?)?)?;
    Some(-total.checked_div(g)?)
}

pub fn payment(t: &TvmInputs) -> Option<Decimal> {
    let i = t.rate()?;
    if i.is_zero() {
        // checked_div rejects n = 0
        return Some(-t.pv.checked_add(t.fv)?.checked_div(t.n)?);
    }
    let g = growth(i, t.n)?;
    let factor = annuity_factor(i, g)?;
    Some(-t.pv.checked_mul(g)?.checked_add(t.fv)?.checked_div(factor)?)
}

pub fn periods(t: &TvmInputs) -> Option<Decimal> {
    let i = t.rate()?;
    if i.is_zero() {
        return Some(-t.pv.checked_add(t.fv)?.checked_div(t.pmt)?);
    }
    let numerator = t.pmt.checked_sub(t.fv.checked_mul(i)?)?;
    let denominator = t.pv.checked_mul(i)?.checked_add(t.pmt)?;
    let argument = numerator.checked_div(denominator)?;
    if argument <= Decimal::ZERO {
        return None;
    }
    argument.checked_ln()?.checked_div(Decimal::ONE.checked_add(i)?.checked_ln()?)
}

/// Periodic rate in percent, found by the secant method
pub fn rate(t: &TvmInputs, solver: &SolverConfig) -> Option<Decimal> {
    if t.n <= Decimal::ZERO {
        return None;
    }
    secant(|r| balance(t, r), solver)?.checked_mul(Decimal::ONE_HUNDRED)
}

/// `PV·(1+r)^n + PMT·(1+r/12)·((1+r)^n−1)/r + FV`
fn balance(t: &TvmInputs, r: Decimal) -> Option<Decimal> {
    if r.is_zero() {
        return t.pv.checked_add(t.pmt.checked_mul(t.n)?)?.checked_add(t.fv);
    }
    let g = growth(r, t.n)?;
    let timing = Decimal::ONE.checked_add(r.checked_div(Decimal::from(12))?)?;
    let annuity = t.pmt.checked_mul(timing)?.checked_mul(annuity_factor(r, g)?)?;
    t.pv.checked_mul(g)?.checked_add(annuity)?.checked_add(t.fv)
}

fn secant(f: impl Fn(Decimal) -> Option<Decimal>, solver: &SolverConfig) -> Option<Decimal> {
    let (mut x0, mut x1) = (solver.first_guess, solver.second_guess);
    for iteration in 0..solver.max_iterations {
        let f0 = f(x0)?;
        let f1 = f(x1)?;
        if f1.abs() < solver.tolerance {
            return Some(x1);
        }
        let slope = f1.checked_sub(f0)?;
        if slope.is_zero() {
            debug!(iteration, "secant slope vanished");
            return None;
        }
        let next = x1.checked_sub(f1.checked_mul(x1.checked_sub(x0)?)?.checked_div(slope)?)?;
        if next.checked_sub(x1)?.abs() < solver.tolerance {
            return Some(next);
        }
        x0 = x1;
        x1 = next;
    }
    debug!(max_iterations = solver.max_iterations, "rate solver did not converge");
    None
}
