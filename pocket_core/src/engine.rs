//! # Calculator Engine
//!
//! One [`Engine`] value owns all calculator state: the accumulator, the
//! input buffer, the pending operation and the sticky error status. Every
//! public method maps to one user gesture and returns the text a display
//! should show, or the error the front-end must translate into its fixed
//! message.
//!
//! The engine mimics a simple hand-held calculator: a single pending binary
//! operation, no precedence, no expression stack. Repeating `=` with an
//! empty buffer reuses the accumulator as the second operand.
//!
//! ## Example
//!
//! ```rust
//! use pocket_core::engine::{BinaryOp, Engine, UnaryOp};
//!
//! let mut eng = Engine::new();
//! eng.insert_digit('4').unwrap();
//! eng.select_binary(BinaryOp::Add).unwrap();
//! eng.insert_digit('6').unwrap();
//! assert_eq!(eng.evaluate().unwrap(), "10");
//!
//! eng.cancel().unwrap();
//! eng.insert_digit('3').unwrap();
//! assert_eq!(eng.apply_unary(UnaryOp::Factorial).unwrap(), "6");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arith;
use crate::buffer::InputBuffer;
use crate::config::EngineConfig;
use crate::display::format_value;
use crate::errors::{EngineError, EngineResult};

/// Largest magnitude the display contract can represent. Any result beyond
/// it is reported as an overflow.
pub const DISPLAY_MAGNITUDE_LIMIT: f64 = 9.999999999e99;

/// Largest factorial operand whose exact integer result stays representable.
pub const FACTORIAL_OPERAND_LIMIT: f64 = 20.0;

/// Binary operations selectable between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Root,
    Combination,
}

/// Unary operations applied to a single resolved operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Factorial,
}

/// What the engine is waiting for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pending {
    /// No operation selected; the buffer holds the first operand.
    None,
    /// The last action completed an evaluation; the accumulator holds the
    /// result. New buffer input starts a fresh expression.
    JustEvaluated,
    /// A binary operation awaiting its second operand.
    Binary(BinaryOp),
}

/// The calculator state machine.
///
/// Created once, mutated in place by every gesture, dropped at shutdown.
/// Exclusively owned by its caller; no internal locking, no globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    memory: f64,
    buffer: InputBuffer,
    pending: Pending,
    status: Option<EngineError>,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with limits and decimal separator taken from the
    /// locale environment.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            memory: 0.0,
            buffer: InputBuffer::default(),
            pending: Pending::None,
            status: None,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The sticky error, if the engine is currently stuck.
    pub fn status(&self) -> Option<EngineError> {
        self.status
    }

    /// Read the accumulator as display text without mutating anything.
    pub fn memory_display(&self) -> String {
        format_value(self.memory)
    }

    /// Reset to the initial state: buffer cleared, accumulator zeroed,
    /// pending operation dropped. The only operation that lifts a sticky
    /// error.
    pub fn cancel(&mut self) -> EngineResult<String> {
        self.buffer.clear();
        self.memory = 0.0;
        self.pending = Pending::None;
        self.status = None;
        Ok("0".to_string())
    }

    /// Remove the last typed character. Idempotent on an empty buffer.
    pub fn backspace(&mut self) -> EngineResult<String> {
        self.guard()?;
        self.buffer.backspace();
        Ok(self.buffer.display())
    }

    /// Type one digit `'0'`-`'9'` into the buffer.
    pub fn insert_digit(&mut self, digit: char) -> EngineResult<String> {
        self.guard()?;
        self.buffer.insert_digit(digit, &self.config);
        self.leave_just_evaluated();
        Ok(self.buffer.display())
    }

    /// Type the decimal point.
    pub fn insert_decimal_point(&mut self) -> EngineResult<String> {
        self.guard()?;
        self.buffer.insert_decimal_point(&self.config);
        self.leave_just_evaluated();
        Ok(self.buffer.display())
    }

    /// Type the exponent marker.
    pub fn insert_exponent(&mut self) -> EngineResult<String> {
        self.guard()?;
        self.buffer.insert_exponent(&self.config);
        self.leave_just_evaluated();
        Ok(self.buffer.display())
    }

    /// Toggle the sign of the mantissa, or of the exponent once the marker
    /// has been typed.
    pub fn negate(&mut self) -> EngineResult<String> {
        self.guard()?;
        self.buffer.negate();
        self.leave_just_evaluated();
        Ok(self.buffer.display())
    }

    /// Select the pending binary operation.
    ///
    /// With another operation already pending and a second operand typed,
    /// that expression is evaluated first, so chains like `5 * 2 /` display
    /// the running result at each operator.
    pub fn select_binary(&mut self, op: BinaryOp) -> EngineResult<String> {
        self.guard()?;
        let result = self.select_binary_inner(op);
        self.stick(result)
    }

    fn select_binary_inner(&mut self, op: BinaryOp) -> EngineResult<String> {
        match self.pending {
            Pending::None => {
                self.memory = self.buffer.consume(&self.config)?;
            }
            Pending::JustEvaluated => {}
            Pending::Binary(prev) => {
                if !self.buffer.is_empty() {
                    let operand = self.buffer.consume(&self.config)?;
                    self.apply_binary(prev, operand)?;
                }
            }
        }
        self.pending = Pending::Binary(op);
        debug!(?op, memory = self.memory, "binary operation selected");
        Ok(format_value(self.memory))
    }

    /// Evaluate the pending expression (`=`).
    ///
    /// Without a pending operation the typed input is committed to the
    /// accumulator as-is. With a pending operation and an empty buffer the
    /// accumulator is used as both operands.
    pub fn evaluate(&mut self) -> EngineResult<String> {
        self.guard()?;
        let result = self.evaluate_inner();
        self.stick(result)
    }

    fn evaluate_inner(&mut self) -> EngineResult<String> {
        match self.pending {
            Pending::None => {
                self.memory = self.buffer.consume(&self.config)?;
            }
            Pending::JustEvaluated => {
                if !self.buffer.is_empty() {
                    self.memory = self.buffer.consume(&self.config)?;
                }
            }
            Pending::Binary(op) => {
                let operand = if self.buffer.is_empty() {
                    self.memory
                } else {
                    self.buffer.consume(&self.config)?
                };
                self.apply_binary(op, operand)?;
            }
        }
        self.pending = Pending::JustEvaluated;
        debug!(memory = self.memory, "expression evaluated");
        Ok(format_value(self.memory))
    }

    /// Apply a unary operation.
    ///
    /// The operand resolves like `=` does: the typed input when nothing is
    /// pending, the accumulator right after an evaluation, otherwise the
    /// value of the pending expression evaluated first.
    pub fn apply_unary(&mut self, op: UnaryOp) -> EngineResult<String> {
        self.guard()?;
        let result = self.apply_unary_inner(op);
        self.stick(result)
    }

    fn apply_unary_inner(&mut self, op: UnaryOp) -> EngineResult<String> {
        match self.pending {
            Pending::None => {
                self.memory = self.buffer.consume(&self.config)?;
            }
            Pending::JustEvaluated if self.buffer.is_empty() => {}
            _ => {
                self.evaluate_inner()?;
            }
        }
        match op {
            UnaryOp::Factorial => {
                let operand = self.memory.trunc();
                if operand < 0.0 {
                    return Err(EngineError::Math);
                }
                if operand > FACTORIAL_OPERAND_LIMIT {
                    return Err(EngineError::Overflow);
                }
                self.memory = arith::factorial(operand as u64) as f64;
            }
        }
        self.pending = Pending::JustEvaluated;
        Ok(format_value(self.memory))
    }

    /// Evaluate `memory <op> operand` into the accumulator.
    ///
    /// Operand domains are validated before computing; a failed check leaves
    /// the accumulator untouched. On overflow the accumulator keeps the
    /// computed value and only the status reports the failure.
    fn apply_binary(&mut self, op: BinaryOp, operand: f64) -> EngineResult<()> {
        let result = match op {
            BinaryOp::Add => arith::add(self.memory, operand),
            BinaryOp::Subtract => arith::sub(self.memory, operand),
            BinaryOp::Multiply => arith::mul(self.memory, operand),
            BinaryOp::Divide => {
                if operand == 0.0 {
                    return Err(EngineError::Math);
                }
                arith::div(self.memory, operand)
            }
            BinaryOp::Power => {
                if operand < 0.0 || operand.fract() != 0.0 {
                    return Err(EngineError::Math);
                }
                arith::power(self.memory, operand as u64)
            }
            BinaryOp::Root => {
                if operand <= 0.0 || operand.fract() != 0.0 {
                    return Err(EngineError::Math);
                }
                let index = operand as u64;
                if self.memory < 0.0 && index % 2 == 0 {
                    return Err(EngineError::Math);
                }
                arith::root(self.memory, index)
            }
            BinaryOp::Combination => {
                let n = self.memory.trunc();
                let k = operand.trunc();
                if n < 0.0 || k < 0.0 {
                    return Err(EngineError::Math);
                }
                arith::binomial(n as u64, k as u64)
            }
        };
        self.memory = result;
        if result.abs() > DISPLAY_MAGNITUDE_LIMIT {
            return Err(EngineError::Overflow);
        }
        Ok(())
    }

    fn guard(&self) -> EngineResult<()> {
        match self.status {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn stick(&mut self, result: EngineResult<String>) -> EngineResult<String> {
        if let Err(err) = &result {
            self.status = Some(*err);
            debug!(error = err.error_code(), "engine entered error state");
        }
        result
    }

    /// New buffer input discards a just-evaluated result.
    fn leave_just_evaluated(&mut self) {
        if self.pending == Pending::JustEvaluated {
            self.pending = Pending::None;
        }
    }
}
