mod divination_source;
mod text_generator;

pub use divination_source::*;
pub use text_generator::*;
