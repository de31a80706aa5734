pub mod booking;
pub mod cohort;
pub mod commands;
pub mod errors;
pub mod value_objects;

pub use cohort::*;
pub use errors::*;
pub use value_objects::*;
