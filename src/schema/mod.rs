//! GraphQL schema parsing and diffing.

pub mod change;
pub mod diff;
pub mod model;

pub use change::{Change, ChangeKind, Disposition};
pub use diff::diff;
pub use model::{SchemaModel, parse_schema};
