//! Printing call results.

use std::fmt;
use std::io::Write;

use crate::error::{Error, Result};

/// A single value returned by an export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultValue {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Everything an export returned, in order.
///
/// Displays as the values separated by single spaces; an export with no
/// results displays as the empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnValue(pub Vec<ResultValue>);

impl ReturnValue {
    /// The first returned value, if any.
    pub fn first(&self) -> Option<&ResultValue> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = self.0.iter();
        if let Some(first) = values.next() {
            write!(f, "{first}")?;
        }
        for v in values {
            write!(f, " {v}")?;
        }
        Ok(())
    }
}

impl From<ResultValue> for ReturnValue {
    fn from(value: ResultValue) -> Self {
        Self(vec![value])
    }
}

/// Write `value` followed by a newline.
pub fn write_result<W: Write>(mut writer: W, value: &ReturnValue) -> Result<()> {
    writeln!(writer, "{value}").map_err(Error::Write)?;
    writer.flush().map_err(Error::Write)
}
