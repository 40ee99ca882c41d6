// ============================================================================
// Numeric Module
// Exact arbitrary-precision arithmetic for the conversion engine
// ============================================================================
//
// This module provides:
// - NumericValue: closed sum of i64 / f64 / BigInt / scaled decimal
// - Arithmetic: scale alignment, + - * / %, exact comparison, powers
// - Hyperoperations, the factorial family and Newton root extraction
// - NumericError: error taxonomy for all of the above
//
// Design principles:
// - Exact decimal results everywhere except root extraction
// - All fallible arithmetic has a checked_* form returning Result
// - Iterative operations are bounded by CalculationConfig ceilings

mod arithmetic;
mod errors;
mod factorial;
mod hyper;
mod root;
mod value;

pub use arithmetic::{align, DIVISION_PRECISION};
pub use errors::{ErrorKind, NumericError, NumericResult};
pub use factorial::{factorial_with, step_factorial_with, subfactorial_with};
pub use hyper::hyper_with;
pub use root::{nth_root_with, ROOT_TOLERANCE};
pub use value::NumericValue;
