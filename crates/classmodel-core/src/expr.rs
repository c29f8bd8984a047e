//! Deferred constant expressions.
//!
//! Constant values and property defaults are written as expressions that may
//! refer to other class constants, possibly ones declared later or in classes
//! not loaded yet. They are held as [`ConstExpr`] trait objects and evaluated
//! during resolution against a [`ConstScope`], which answers class-constant
//! fetches and owns cycle detection.
//!
//! [`Expr`] is the built-in expression tree covering literal values,
//! class-constant fetches and scalar arithmetic. Hosts with their own AST
//! implement [`ConstExpr`] for their node type instead.

use std::fmt;

use crate::{ClassError, ClassName, Value};

/// Target class of a constant fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassRef {
    /// `self::NAME` - the class declaring the expression.
    SelfClass,
    /// `static::NAME` - bound like `self` at declaration time.
    Static,
    /// `parent::NAME` - the declared parent of the class.
    Parent,
    /// `Some\Class::NAME`.
    Named(ClassName),
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassRef::SelfClass => f.write_str("self"),
            ClassRef::Static => f.write_str("static"),
            ClassRef::Parent => f.write_str("parent"),
            ClassRef::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Evaluation environment handed to a [`ConstExpr`].
pub trait ConstScope {
    /// Fetch `class::name`, evaluating it first if it is still pending.
    fn class_constant(&mut self, class: &ClassRef, name: &str) -> Result<Value, ClassError>;
}

/// An already-parsed expression that can be evaluated once its scope exists.
pub trait ConstExpr: fmt::Debug + Send + Sync {
    /// Evaluate against `scope`.
    fn evaluate(&self, scope: &mut dyn ConstScope) -> Result<Value, ClassError>;
}

/// Binary operators allowed in constant expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitOr,
    BitAnd,
    Concat,
}

impl BinaryOp {
    /// Apply the operator to two evaluated operands.
    pub fn apply(self, lhs: &Value, rhs: &Value) -> Result<Value, ClassError> {
        match self {
            BinaryOp::Add => lhs.add(rhs),
            BinaryOp::Sub => lhs.sub(rhs),
            BinaryOp::Mul => lhs.mul(rhs),
            BinaryOp::Div => lhs.div(rhs),
            BinaryOp::Mod => lhs.rem(rhs),
            BinaryOp::BitOr => lhs.bit_or(rhs),
            BinaryOp::BitAnd => lhs.bit_and(rhs),
            BinaryOp::Concat => lhs.concat(rhs),
        }
    }

    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitOr => "|",
            BinaryOp::BitAnd => "&",
            BinaryOp::Concat => ".",
        }
    }
}

/// Built-in constant expression tree.
///
/// # Example
///
/// ```
/// use classmodel_core::{BinaryOp, Expr};
///
/// // self::Y + 1
/// let expr = Expr::binary(BinaryOp::Add, Expr::self_constant("Y"), Expr::literal(1));
/// assert_eq!(expr.to_string(), "(self::Y + 1)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Value),
    /// `class::NAME`.
    ClassConstant { class: ClassRef, name: String },
    /// `lhs op rhs`.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `-operand`.
    Negate(Box<Expr>),
}

impl Expr {
    /// A literal.
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// `self::NAME`.
    pub fn self_constant(name: impl Into<String>) -> Self {
        Expr::ClassConstant {
            class: ClassRef::SelfClass,
            name: name.into(),
        }
    }

    /// `parent::NAME`.
    pub fn parent_constant(name: impl Into<String>) -> Self {
        Expr::ClassConstant {
            class: ClassRef::Parent,
            name: name.into(),
        }
    }

    /// `Class::NAME`.
    pub fn class_constant(class: impl Into<ClassName>, name: impl Into<String>) -> Self {
        Expr::ClassConstant {
            class: ClassRef::Named(class.into()),
            name: name.into(),
        }
    }

    /// `lhs op rhs`.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `-operand`.
    pub fn negate(operand: Expr) -> Self {
        Expr::Negate(Box::new(operand))
    }
}

impl ConstExpr for Expr {
    fn evaluate(&self, scope: &mut dyn ConstScope) -> Result<Value, ClassError> {
        match self {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::ClassConstant { class, name } => scope.class_constant(class, name),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(scope)?;
                let rhs = rhs.evaluate(scope)?;
                op.apply(&lhs, &rhs)
            }
            Expr::Negate(operand) => Value::Int(0).sub(&operand.evaluate(scope)?),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::ClassConstant { class, name } => write!(f, "{class}::{name}"),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.as_str()),
            Expr::Negate(operand) => write!(f, "-{operand}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scope answering every fetch from a fixed table.
    struct TableScope(Vec<(&'static str, Value)>);

    impl ConstScope for TableScope {
        fn class_constant(&mut self, _class: &ClassRef, name: &str) -> Result<Value, ClassError> {
            self.0
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| ClassError::UndefinedConstant {
                    class: "self".to_string(),
                    name: name.to_string(),
                })
        }
    }

    #[test]
    fn literal_evaluates_to_itself() {
        let mut scope = TableScope(vec![]);
        assert_eq!(
            Expr::literal("x").evaluate(&mut scope).unwrap(),
            Value::string("x")
        );
    }

    #[test]
    fn constant_fetch_goes_through_scope() {
        let mut scope = TableScope(vec![("Y", Value::Int(1))]);
        let expr = Expr::binary(BinaryOp::Add, Expr::self_constant("Y"), Expr::literal(1));
        assert_eq!(expr.evaluate(&mut scope).unwrap(), Value::Int(2));
    }

    #[test]
    fn missing_constant_propagates() {
        let mut scope = TableScope(vec![]);
        let err = Expr::self_constant("NOPE").evaluate(&mut scope).unwrap_err();
        assert!(matches!(err, ClassError::UndefinedConstant { .. }));
    }

    #[test]
    fn negate() {
        let mut scope = TableScope(vec![]);
        let expr = Expr::negate(Expr::literal(5));
        assert_eq!(expr.evaluate(&mut scope).unwrap(), Value::Int(-5));
    }

    #[test]
    fn display() {
        let expr = Expr::binary(
            BinaryOp::Concat,
            Expr::class_constant("App\\Config", "PREFIX"),
            Expr::literal("_x"),
        );
        assert_eq!(expr.to_string(), "(App\\Config::PREFIX . '_x')");
    }
}
