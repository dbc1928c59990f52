//! Security and path authorization.

mod roots;

pub use roots::{RootError, RootSet};
