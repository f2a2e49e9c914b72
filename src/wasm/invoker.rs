//! Core WebAssembly module invocation using wasmtime.
//!
//! Each call compiles the module, instantiates it in a fresh [`Store`],
//! looks up the export and calls it with the adapted arguments. The store
//! owns the instance, so the instance is torn down when `invoke` returns,
//! whether the call succeeded or not.
//!
//! ## Example
//!
//! ```ignore
//! let invoker = Invoker::new()?;
//! let result = invoker.invoke(&module_bytes, "sum", &[Arg::I32(40), Arg::I32(2)])?;
//! assert_eq!(result.to_string(), "42");
//! ```

use wasmtime::{Config, Engine, Linker, Module, Store, Val, ValType};

use super::error::WasmError;
use crate::logging::{debug, info, trace};
use crate::output::{ResultValue, ReturnValue};
use crate::params::{Arg, coerce, json_kind};
use crate::request::ParamType;

/// Export called when none is configured.
pub const DEFAULT_EXPORT: &str = "sum";

/// Instantiates modules and calls a single export.
pub struct Invoker {
    engine: Engine,
}

impl Invoker {
    /// Create an invoker with a default wasmtime engine.
    pub fn new() -> Result<Self, WasmError> {
        let config = Config::new();
        let engine = Engine::new(&config)?;
        Ok(Self { engine })
    }

    /// Create an invoker sharing an existing engine.
    pub fn with_engine(engine: Engine) -> Self {
        Self { engine }
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Instantiate `module_bytes` and call `export` with `args`.
    pub fn invoke(
        &self,
        module_bytes: &[u8],
        export: &str,
        args: &[Arg],
    ) -> Result<ReturnValue, WasmError> {
        let module = Module::from_binary(&self.engine, module_bytes).map_err(|e| {
            debug!(error = %e, "module compilation failed");
            WasmError::Compile(e.to_string())
        })?;

        let linker: Linker<()> = Linker::new(&self.engine);
        let mut store = Store::new(&self.engine, ());
        let instance = linker
            .instantiate(&mut store, &module)
            .map_err(|e| WasmError::Instantiate(e.to_string()))?;
        debug!(len = module_bytes.len(), "instantiated module");

        let func = instance
            .get_func(&mut store, export)
            .ok_or_else(|| WasmError::FunctionNotFound(export.to_string()))?;
        let ty = func.ty(&store);

        let param_types: Vec<ValType> = ty.params().collect();
        if param_types.len() != args.len() {
            return Err(WasmError::ArityMismatch {
                name: export.to_string(),
                expected: param_types.len(),
                actual: args.len(),
            });
        }

        let params = args
            .iter()
            .zip(&param_types)
            .enumerate()
            .map(|(index, (arg, ty))| lower_arg(index, arg, ty))
            .collect::<Result<Vec<Val>, WasmError>>()?;

        let mut results = ty
            .results()
            .map(|ty| placeholder_val(&ty))
            .collect::<Result<Vec<Val>, WasmError>>()?;

        debug!(export, params = params.len(), "calling export");
        func.call(&mut store, &params, &mut results).map_err(|e| {
            debug!(export, error = %e, "wasm call failed");
            WasmError::Trap(e.to_string())
        })?;

        let values = results
            .iter()
            .map(lift_val)
            .collect::<Result<Vec<_>, WasmError>>()?;
        info!(export, results = values.len(), "call completed");
        Ok(ReturnValue(values))
    }
}

/// Map a wasm value type onto the request's type tags.
fn declared_type(ty: &ValType) -> Result<ParamType, WasmError> {
    match ty {
        ValType::I32 => Ok(ParamType::I32),
        ValType::I64 => Ok(ParamType::I64),
        ValType::F32 => Ok(ParamType::F32),
        ValType::F64 => Ok(ParamType::F64),
        other => Err(WasmError::UnsupportedType(other.to_string())),
    }
}

/// Convert an adapted argument to a wasmtime value of the declared type.
///
/// Untyped arguments are coerced here, using the declared type as the tag.
fn lower_arg(index: usize, arg: &Arg, ty: &ValType) -> Result<Val, WasmError> {
    let declared = declared_type(ty)?;
    let arg = match arg {
        Arg::Untyped(value) => {
            coerce(index, value, declared).map_err(|_| WasmError::SignatureMismatch {
                index,
                expected: declared.to_string(),
                actual: json_kind(value).to_string(),
            })?
        }
        typed => typed.clone(),
    };
    trace!(index, arg = %arg, "lowering argument");

    match (arg, declared) {
        (Arg::I32(v), ParamType::I32) => Ok(Val::I32(v)),
        (Arg::I64(v), ParamType::I64) => Ok(Val::I64(v)),
        (Arg::F32(v), ParamType::F32) => Ok(Val::F32(v.to_bits())),
        (Arg::F64(v), ParamType::F64) => Ok(Val::F64(v.to_bits())),
        (other, _) => Err(WasmError::SignatureMismatch {
            index,
            expected: declared.to_string(),
            actual: other.param_type().to_string(),
        }),
    }
}

/// Create a placeholder Val for a function result of the given type.
fn placeholder_val(ty: &ValType) -> Result<Val, WasmError> {
    match ty {
        ValType::I32 => Ok(Val::I32(0)),
        ValType::I64 => Ok(Val::I64(0)),
        ValType::F32 => Ok(Val::F32(0)),
        ValType::F64 => Ok(Val::F64(0)),
        other => Err(WasmError::UnsupportedType(other.to_string())),
    }
}

fn lift_val(val: &Val) -> Result<ResultValue, WasmError> {
    match val {
        Val::I32(v) => Ok(ResultValue::I32(*v)),
        Val::I64(v) => Ok(ResultValue::I64(*v)),
        Val::F32(bits) => Ok(ResultValue::F32(f32::from_bits(*bits))),
        Val::F64(bits) => Ok(ResultValue::F64(f64::from_bits(*bits))),
        other => Err(WasmError::UnsupportedType(format!("{other:?}"))),
    }
}
