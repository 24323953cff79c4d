//! Feature checks grouped by the kind of feature they inspect.

pub mod binary;
pub mod categorical;
pub mod general;
pub mod unique;
