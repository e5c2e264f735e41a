//! Step catalog - static, ordered step definitions per sequence.
//!
//! The catalog is leaf data: it is provided at startup and only supports
//! lookup by id and iteration in defined order.

mod builtin;
mod sequence;
mod step;
mod step_catalog;

pub use builtin::CSS092_SITE_LABEL;
pub use sequence::Sequence;
pub use step::Step;
pub use step_catalog::{CatalogError, StepCatalog};
