use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use syn::{Attribute, FnArg, Item, ItemFn, LitStr, Meta, Pat, ReturnType, Type};
use walkdir::WalkDir;

use crate::probe::Operation;

/// Primitive types an exported function may use
#[derive(Debug, Clone, PartialEq)]
pub enum FfiType {
    Void,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Other(String),
}

impl FfiType {
    /// Parse from syn::Type
    pub fn from_syn_type(ty: &Type) -> Self {
        match ty {
            Type::Path(type_path) => {
                let Some(last_segment) = type_path.path.segments.last() else {
                    return FfiType::Other(String::new());
                };
                match last_segment.ident.to_string().as_str() {
                    "i32" => FfiType::Int,
                    "i64" => FfiType::Long,
                    "f32" => FfiType::Float,
                    "f64" => FfiType::Double,
                    "bool" => FfiType::Bool,
                    other => FfiType::Other(other.to_string()),
                }
            }
            Type::Tuple(tuple) if tuple.elems.is_empty() => FfiType::Void,
            _ => FfiType::Other("<complex>".to_string()),
        }
    }

    /// Get the corresponding C type name
    pub fn to_c_type(&self) -> &str {
        match self {
            FfiType::Void => "void",
            FfiType::Int => "int32_t",
            FfiType::Long => "int64_t",
            FfiType::Float => "float",
            FfiType::Double => "double",
            FfiType::Bool => "bool",
            FfiType::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportedFunction {
    /// Name of the Rust function
    pub name: String,
    /// Name of the unmangled symbol
    pub symbol: String,
    pub params: Vec<(String, FfiType)>,
    pub return_type: FfiType,
    pub source_file: PathBuf,
}

impl ExportedFunction {
    /// C declaration, e.g. `double Add(double a, double b)`
    pub fn c_signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|(name, ty)| format!("{} {}", ty.to_c_type(), name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {}({})", self.return_type.to_c_type(), self.symbol, params)
    }

    fn has_binary_double_shape(&self) -> bool {
        self.return_type == FfiType::Double
            && self.params.len() == 2
            && self.params.iter().all(|(_, ty)| *ty == FfiType::Double)
    }
}

/// Discover all #[ffi] functions in a file or, recursively, a directory
pub fn discover_exports(path: &Path) -> Result<Vec<ExportedFunction>> {
    if path.is_file() {
        return parse_rust_file(path);
    }
    if !path.is_dir() {
        bail!("Path not found: {}", path.display());
    }

    let mut functions = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.context(format!("Failed to walk {}", path.display()))?;
        let entry_path = entry.path();
        if entry_path.is_file() && entry_path.extension().and_then(|s| s.to_str()) == Some("rs") {
            functions.extend(parse_rust_file(entry_path)?);
        }
    }

    Ok(functions)
}

/// Parse a single Rust file for #[ffi] annotations
fn parse_rust_file(path: &Path) -> Result<Vec<ExportedFunction>> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read file: {}", path.display()))?;

    parse_exports_from_string(&content, path)
}

/// Parse Rust source code for #[ffi] annotations (testable)
pub fn parse_exports_from_string(content: &str, source_file: &Path) -> Result<Vec<ExportedFunction>> {
    let syntax = syn::parse_file(content)
        .context(format!("Failed to parse Rust file: {}", source_file.display()))?;

    let mut functions = Vec::new();
    for item in syntax.items {
        if let Item::Fn(func) = item {
            if let Some(attr) = find_ffi_attribute(&func.attrs) {
                let symbol = export_name(attr, &func)?;
                functions.push(parse_ffi_function(func, symbol, source_file)?);
            }
        }
    }

    Ok(functions)
}

/// Matches `#[ffi]` and `#[arith_ffi_macro::ffi]`
fn find_ffi_attribute(attrs: &[Attribute]) -> Option<&Attribute> {
    attrs.iter().find(|attr| {
        let path = attr.path();
        path.is_ident("ffi")
            || (path.segments.len() == 2
                && path.segments[0].ident == "arith_ffi_macro"
                && path.segments[1].ident == "ffi")
    })
}

fn export_name(attr: &Attribute, func: &ItemFn) -> Result<String> {
    let mut symbol = func.sig.ident.to_string();
    if let Meta::List(_) = attr.meta {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("export") {
                let lit: LitStr = meta.value()?.parse()?;
                symbol = lit.value();
                Ok(())
            } else {
                Err(meta.error("unsupported ffi property"))
            }
        })
        .context(format!("Invalid #[ffi] attribute on '{}'", func.sig.ident))?;
    }
    Ok(symbol)
}

fn parse_ffi_function(func: ItemFn, symbol: String, source_file: &Path) -> Result<ExportedFunction> {
    let function_name = func.sig.ident.to_string();

    let mut params = Vec::new();
    for input in &func.sig.inputs {
        match input {
            FnArg::Typed(pat_type) => {
                let param_name = match &*pat_type.pat {
                    Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
                    _ => bail!("Unsupported parameter pattern in function '{}' at {}",
                              function_name, source_file.display()),
                };
                params.push((param_name, FfiType::from_syn_type(&pat_type.ty)));
            }
            FnArg::Receiver(_) => {
                bail!("FFI functions cannot have 'self' parameter in function '{}' at {}",
                      function_name, source_file.display());
            }
        }
    }

    let return_type = match &func.sig.output {
        ReturnType::Default => FfiType::Void,
        ReturnType::Type(_, ty) => FfiType::from_syn_type(ty),
    };

    Ok(ExportedFunction {
        name: function_name,
        symbol,
        params,
        return_type,
        source_file: source_file.to_path_buf(),
    })
}

/// Check that every operation is exported exactly once as `double(double, double)`.
/// Returns one message per violation; empty means the surface is complete.
pub fn validate_surface(functions: &[ExportedFunction]) -> Vec<String> {
    let mut errors = Vec::new();

    for op in Operation::ALL {
        let matching: Vec<&ExportedFunction> = functions
            .iter()
            .filter(|f| f.symbol == op.symbol())
            .collect();

        match matching.as_slice() {
            [] => errors.push(format!("missing export `{}`", op.symbol())),
            [function] => {
                if !function.has_binary_double_shape() {
                    errors.push(format!(
                        "`{}` has signature `{}`, expected `double {}(double, double)`",
                        op.symbol(),
                        function.c_signature(),
                        op.symbol()
                    ));
                }
            }
            many => errors.push(format!(
                "`{}` is exported {} times",
                op.symbol(),
                many.len()
            )),
        }
    }

    errors
}
