//! Convenience constructors for common IR shapes, so a language printer rarely has to push
//! `Signal`s by hand.

mod gen_separated_values;
mod helpers;

pub use gen_separated_values::*;
pub use helpers::*;
