use anyhow::{Context, Result};
use libloading::Library;
use std::path::Path;

use super::{Calculator, EntryPoint, Operation};

/// Entry points resolved from a built arith shared library
pub struct DynamicCalculator {
    /// Indexed by `Operation as usize`
    entries: [EntryPoint; 4],
    // Keeps the entry points above valid
    _library: Library,
}

impl DynamicCalculator {
    /// Load the library at `path` and resolve all four symbols
    pub fn open(path: &Path) -> Result<Self> {
        // SAFETY: loading runs the library's initializers; arith has none of its own
        let library = unsafe { Library::new(path) }
            .context(format!("Failed to load library: {}", path.display()))?;

        let entries = [
            resolve(&library, Operation::Add, path)?,
            resolve(&library, Operation::Subtract, path)?,
            resolve(&library, Operation::Multiply, path)?,
            resolve(&library, Operation::Divide, path)?,
        ];

        Ok(Self {
            entries,
            _library: library,
        })
    }
}

fn resolve(library: &Library, op: Operation, path: &Path) -> Result<EntryPoint> {
    let name = format!("{}\0", op.symbol());
    // SAFETY: every arith export has the `extern "C" fn(f64, f64) -> f64` signature
    let symbol = unsafe { library.get::<EntryPoint>(name.as_bytes()) }
        .context(format!("Symbol `{}` not exported by {}", op.symbol(), path.display()))?;
    Ok(*symbol)
}

impl Calculator for DynamicCalculator {
    fn apply(&self, op: Operation, a: f64, b: f64) -> f64 {
        (self.entries[op as usize])(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_library() {
        let err = DynamicCalculator::open(Path::new("does-not-exist/libarith.so")).err().unwrap();
        assert!(err.to_string().starts_with("Failed to load library: does-not-exist"));
    }

    #[test]
    fn test_entries_follow_declaration_order() {
        for (index, op) in Operation::ALL.iter().enumerate() {
            assert_eq!(*op as usize, index);
        }
    }
}
