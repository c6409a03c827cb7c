//! String cleanup and unit canonicalization shared by all vendor grammars.

pub mod color;
pub mod size;

pub use color::{collapse_whitespace, finish, strip_trailing_number, ColorCleaner};
pub use size::{normalize_size, spaced_size};
