/// The `macro_from_number` module provides `From<N>` impls for `Value` over
/// the primitive numeric types.
#[macro_use]
pub mod macro_from_number;

/// The `macro_partialeq_numeric` module provides `PartialEq<N>` impls for
/// `Value` over the primitive numeric types.
#[macro_use]
pub mod macro_partialeq_numeric;
