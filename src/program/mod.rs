pub mod builder;
pub mod conversion;
pub mod definition;
pub mod samples;

pub use builder::*;
pub use conversion::*;
pub use definition::*;
