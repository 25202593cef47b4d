mod divination;
mod section;

pub use divination::*;
pub use section::*;
