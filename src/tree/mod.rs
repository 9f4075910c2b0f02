pub mod display;
pub mod gate;
pub mod node;

pub use display::*;
pub use gate::*;
pub use node::*;
