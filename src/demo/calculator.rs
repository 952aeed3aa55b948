// Arithmetic helpers and a chaining accumulator

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,
}

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Quotient of `a` and `b`; a zero divisor is an error, never infinity or NaN
pub fn divide(a: f64, b: f64) -> Result<f64, CalcError> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a / b)
}

/// Running value with a log of the operations applied to it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calculator {
    value: f64,
    history: Vec<String>,
}

impl Calculator {
    pub fn new(initial: f64) -> Self {
        Self {
            value: initial,
            history: Vec::new(),
        }
    }

    pub fn add(&mut self, n: f64) -> &mut Self {
        self.history.push(format!("add {n}"));
        self.value += n;
        self
    }

    pub fn subtract(&mut self, n: f64) -> &mut Self {
        self.history.push(format!("subtract {n}"));
        self.value -= n;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Back to zero with an empty history
    pub fn reset(&mut self) -> &mut Self {
        self.value = 0.0;
        self.history.clear();
        self
    }
}
