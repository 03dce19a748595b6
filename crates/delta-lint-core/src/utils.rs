//! Utility functions for rule implementations.

pub mod allowance;
pub mod javadoc;

#[doc(inline)]
pub use allowance::{AllowCheck, AllowDirectives};
#[doc(inline)]
pub use javadoc::javadoc_before;
