pub mod conversion;
pub mod definition;
pub mod ftree;
mod lenient;

pub use conversion::*;
pub use definition::*;
pub use ftree::*;
