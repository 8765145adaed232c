pub mod field;
pub mod seed;

pub use field::{PlateField, PlateSample};
pub use seed::PlateSeed;
