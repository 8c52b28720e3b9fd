//! Type definitions for tribe storage.

mod ids;
mod principals;
mod roles;

pub use ids::*;
pub use principals::*;
pub use roles::*;
