//! Parameter adaptation.
//!
//! Turns the loosely-typed request parameters into [`Arg`]s according to
//! each parameter's declared [`ParamType`]:
//!
//! | tag       | conversion                                             |
//! |-----------|--------------------------------------------------------|
//! | `I32`     | truncate toward zero, wrap to 32 bits                  |
//! | `I64`     | truncate toward zero to 64 bits                        |
//! | `F32`     | narrow to single precision                             |
//! | `F64`     | unchanged double precision                             |
//! | otherwise | raw JSON value, coerced later against the export type  |
//!
//! Fractional numbers are truncated, never rounded: `2.9` tagged `I32`
//! becomes `2`.

use std::fmt;

use serde_json::{Number, Value};

use crate::error::{Error, Result};
use crate::logging::trace;
use crate::request::{ParamType, Parameter};

/// An adapted call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Raw decoded value; the engine coerces it using the export signature.
    Untyped(Value),
}

impl Arg {
    /// The declared type this argument was adapted to.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::I32(_) => ParamType::I32,
            Self::I64(_) => ParamType::I64,
            Self::F32(_) => ParamType::F32,
            Self::F64(_) => ParamType::F64,
            Self::Untyped(_) => ParamType::Untyped,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32(v) => write!(f, "{v}:i32"),
            Self::I64(v) => write!(f, "{v}:i64"),
            Self::F32(v) => write!(f, "{v}:f32"),
            Self::F64(v) => write!(f, "{v}:f64"),
            Self::Untyped(v) => write!(f, "{v}"),
        }
    }
}

/// Adapt every parameter, preserving order.
pub fn adapt(params: &[Parameter]) -> Result<Vec<Arg>> {
    params
        .iter()
        .enumerate()
        .map(|(index, param)| coerce(index, &param.value, param.kind))
        .collect()
}

/// Coerce a single JSON value to `kind`.
///
/// `index` is only used to report which parameter failed.
pub fn coerce(index: usize, value: &Value, kind: ParamType) -> Result<Arg> {
    let arg = match kind {
        ParamType::I32 => Arg::I32(truncate_i64(number(index, value, kind)?) as i32),
        ParamType::I64 => Arg::I64(truncate_i64(number(index, value, kind)?)),
        ParamType::F32 => Arg::F32(number_f64(number(index, value, kind)?) as f32),
        ParamType::F64 => Arg::F64(number_f64(number(index, value, kind)?)),
        ParamType::Untyped => Arg::Untyped(value.clone()),
    };
    trace!(index, kind = %kind, arg = %arg, "adapted parameter");
    Ok(arg)
}

fn number(index: usize, value: &Value, kind: ParamType) -> Result<&Number> {
    value.as_number().ok_or_else(|| Error::TypeMismatch {
        index,
        expected: kind.to_string(),
        found: json_kind(value).to_string(),
    })
}

/// Integral numbers convert exactly (u64 above `i64::MAX` wraps); fractional
/// numbers truncate toward zero and saturate at the i64 bounds.
fn truncate_i64(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if let Some(u) = n.as_u64() {
        u as i64
    } else {
        number_f64(n).trunc() as i64
    }
}

fn number_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
