mod consult;
mod divine;
mod divine_all;
mod extract_text;

pub use consult::*;
pub use divine::*;
pub use divine_all::*;
pub use extract_text::*;
