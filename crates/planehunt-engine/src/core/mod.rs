pub use self::{grid::*, placement::*, shape::*};

pub(crate) mod grid;
pub(crate) mod placement;
pub(crate) mod shape;
