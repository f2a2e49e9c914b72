//! Property-based tests for parameter adaptation.
//!
//! These tests verify that adaptation preserves length and order, and that
//! numeric coercion truncates or narrows exactly as declared.

use proptest::prelude::*;
use serde_json::json;
use wasm_invoke::{Arg, ParamType, Parameter, adapt};

fn param_type() -> impl Strategy<Value = ParamType> {
    prop_oneof![
        Just(ParamType::I32),
        Just(ParamType::I64),
        Just(ParamType::F32),
        Just(ParamType::F64),
        Just(ParamType::Untyped),
    ]
}

proptest! {
    #[test]
    fn adapt_preserves_length_and_order(
        raw in prop::collection::vec((any::<i32>(), param_type()), 0..32)
    ) {
        let params: Vec<Parameter> = raw
            .iter()
            .map(|(v, kind)| Parameter::new(*v, *kind))
            .collect();
        let args = adapt(&params).unwrap();

        prop_assert_eq!(args.len(), params.len());
        for ((v, kind), arg) in raw.iter().zip(&args) {
            prop_assert_eq!(arg.param_type(), *kind);
            let expected = match kind {
                ParamType::I32 => Arg::I32(*v),
                ParamType::I64 => Arg::I64(i64::from(*v)),
                ParamType::F32 => Arg::F32(*v as f64 as f32),
                ParamType::F64 => Arg::F64(f64::from(*v)),
                ParamType::Untyped => Arg::Untyped(json!(*v)),
            };
            prop_assert_eq!(arg, &expected);
        }
    }

    #[test]
    fn i32_truncates_toward_zero(v in -2.0e9f64..2.0e9f64) {
        let args = adapt(&[Parameter::new(v, ParamType::I32)]).unwrap();
        prop_assert_eq!(args, vec![Arg::I32(v.trunc() as i32)]);
    }

    #[test]
    fn i64_truncates_toward_zero(v in -9.0e18f64..9.0e18f64) {
        let args = adapt(&[Parameter::new(v, ParamType::I64)]).unwrap();
        prop_assert_eq!(args, vec![Arg::I64(v.trunc() as i64)]);
    }

    #[test]
    fn i32_wraps_like_a_cast(v in any::<i64>()) {
        let args = adapt(&[Parameter::new(v, ParamType::I32)]).unwrap();
        prop_assert_eq!(args, vec![Arg::I32(v as i32)]);
    }

    #[test]
    fn f32_narrows(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let args = adapt(&[Parameter::new(v, ParamType::F32)]).unwrap();
        prop_assert_eq!(args, vec![Arg::F32(v as f32)]);
    }

    #[test]
    fn f64_is_unchanged(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let args = adapt(&[Parameter::new(v, ParamType::F64)]).unwrap();
        prop_assert_eq!(args, vec![Arg::F64(v)]);
    }

    #[test]
    fn strings_never_coerce_to_numbers(s in "[a-z]{0,12}", kind in param_type()) {
        let result = adapt(&[Parameter::new(s.clone(), kind)]);
        match kind {
            ParamType::Untyped => prop_assert_eq!(result.unwrap(), vec![Arg::Untyped(json!(s))]),
            _ => prop_assert!(result.unwrap_err().is_type_mismatch()),
        }
    }
}
