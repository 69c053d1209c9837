pub mod price;
pub mod threshold;

pub use price::*;
pub use threshold::*;
