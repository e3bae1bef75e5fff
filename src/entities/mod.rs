pub mod prelude;

pub mod cafes;
