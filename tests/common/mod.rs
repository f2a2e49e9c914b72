//! Common test utilities and fixtures.
//!
//! Modules are written as WAT and assembled with the `wat` crate; requests
//! are built with `serde_json::json!` and carry the module as base64.

#![allow(dead_code)]

use base64::{Engine as _, engine::general_purpose};
use serde_json::{Value, json};

// =============================================================================
// WAT Module Definitions
// =============================================================================

/// `sum(i32, i32) -> i32` as `a + b`.
pub const SUM_I32_WAT: &str = r#"
    (module
        (func (export "sum") (param i32 i32) (result i32)
            local.get 0
            local.get 1
            i32.add))
"#;

/// `sum(i64, i64) -> i64` as `a + b`.
pub const SUM_I64_WAT: &str = r#"
    (module
        (func (export "sum") (param i64 i64) (result i64)
            local.get 0
            local.get 1
            i64.add))
"#;

/// `sum(f32, f64) -> f64` as `promote(a) + b`.
pub const SUM_MIXED_FLOAT_WAT: &str = r#"
    (module
        (func (export "sum") (param f32 f64) (result f64)
            local.get 0
            f64.promote_f32
            local.get 1
            f64.add))
"#;

/// Exports both `sum` and `product` over i32.
pub const SUM_AND_PRODUCT_WAT: &str = r#"
    (module
        (func (export "sum") (param i32 i32) (result i32)
            local.get 0
            local.get 1
            i32.add)
        (func (export "product") (param i32 i32) (result i32)
            local.get 0
            local.get 1
            i32.mul))
"#;

/// `sum` that always traps.
pub const TRAPPING_WAT: &str = r#"
    (module
        (func (export "sum") (param i32 i32) (result i32)
            unreachable))
"#;

// =============================================================================
// Helpers
// =============================================================================

/// Assemble a WAT module into a binary.
pub fn module(wat: &str) -> anyhow::Result<Vec<u8>> {
    Ok(wat::parse_str(wat)?)
}

/// Build a request body with the module encoded as base64.
pub fn request(module_bytes: &[u8], params: Value) -> Vec<u8> {
    json!({
        "bytes": general_purpose::STANDARD.encode(module_bytes),
        "params": params,
    })
    .to_string()
    .into_bytes()
}

/// Build a request body with the module encoded as a byte array.
pub fn request_with_byte_array(module_bytes: &[u8], params: Value) -> Vec<u8> {
    json!({
        "bytes": module_bytes,
        "params": params,
    })
    .to_string()
    .into_bytes()
}
