//! Runtime values held by constants and property slots.
//!
//! The class model stores and forwards these, it never converts between
//! them. The arithmetic helpers cover what constant initializers need and
//! reject mixed operands instead of juggling types.

use std::fmt;

use ordered_float::OrderedFloat;

use crate::ClassError;

/// A runtime value.
///
/// `Null` doubles as the canonical "uninitialized" value for property slots
/// declared without a default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    String(String),
}

impl Value {
    /// Create a float value.
    pub fn float(value: f64) -> Self {
        Value::Float(OrderedFloat(value))
    }

    /// Create a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Check for `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The float payload, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(v.0),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the value's type as shown in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Numeric addition.
    pub fn add(&self, rhs: &Value) -> Result<Value, ClassError> {
        self.arith(rhs, "+", i64::checked_add, |a, b| a + b)
    }

    /// Numeric subtraction.
    pub fn sub(&self, rhs: &Value) -> Result<Value, ClassError> {
        self.arith(rhs, "-", i64::checked_sub, |a, b| a - b)
    }

    /// Numeric multiplication.
    pub fn mul(&self, rhs: &Value) -> Result<Value, ClassError> {
        self.arith(rhs, "*", i64::checked_mul, |a, b| a * b)
    }

    /// Numeric division. Integer division yields an integer only when exact.
    pub fn div(&self, rhs: &Value) -> Result<Value, ClassError> {
        let divisor = rhs.as_float().ok_or_else(|| self.unsupported("/", rhs))?;
        if divisor == 0.0 {
            return Err(ClassError::Evaluation("division by zero".to_string()));
        }
        if let (Value::Int(a), Value::Int(b)) = (self, rhs) {
            if a.checked_rem(*b) == Some(0) {
                if let Some(quotient) = a.checked_div(*b) {
                    return Ok(Value::Int(quotient));
                }
            }
        }
        let dividend = self.as_float().ok_or_else(|| self.unsupported("/", rhs))?;
        Ok(Value::float(dividend / divisor))
    }

    /// Integer modulo.
    pub fn rem(&self, rhs: &Value) -> Result<Value, ClassError> {
        match (self, rhs) {
            (Value::Int(_), Value::Int(0)) => {
                Err(ClassError::Evaluation("modulo by zero".to_string()))
            }
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_rem(*b))),
            _ => Err(self.unsupported("%", rhs)),
        }
    }

    /// Integer bitwise or.
    pub fn bit_or(&self, rhs: &Value) -> Result<Value, ClassError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a | b)),
            _ => Err(self.unsupported("|", rhs)),
        }
    }

    /// Integer bitwise and.
    pub fn bit_and(&self, rhs: &Value) -> Result<Value, ClassError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a & b)),
            _ => Err(self.unsupported("&", rhs)),
        }
    }

    /// String concatenation of scalar operands.
    pub fn concat(&self, rhs: &Value) -> Result<Value, ClassError> {
        let mut out = String::new();
        for operand in [self, rhs] {
            match operand {
                Value::Null => {}
                Value::Bool(true) => out.push('1'),
                Value::Bool(false) => {}
                Value::Int(v) => out.push_str(&v.to_string()),
                Value::Float(v) => out.push_str(&v.0.to_string()),
                Value::String(s) => out.push_str(s),
            }
        }
        Ok(Value::String(out))
    }

    fn arith(
        &self,
        rhs: &Value,
        op: &str,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Result<Value, ClassError> {
        match (self, rhs) {
            // Integer overflow promotes to float
            (Value::Int(a), Value::Int(b)) => Ok(int_op(*a, *b)
                .map(Value::Int)
                .unwrap_or_else(|| Value::float(float_op(*a as f64, *b as f64)))),
            _ => match (self.as_float(), rhs.as_float()) {
                (Some(a), Some(b)) => Ok(Value::float(float_op(a, b))),
                _ => Err(self.unsupported(op, rhs)),
            },
        }
    }

    fn unsupported(&self, op: &str, rhs: &Value) -> ClassError {
        ClassError::Evaluation(format!(
            "unsupported operand types: {} {op} {}",
            self.type_name(),
            rhs.type_name()
        ))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{}", v.0),
            Value::String(s) => write!(f, "'{s}'"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}
