pub mod text;
pub mod counts;
pub mod result;

pub use text::*;
pub use counts::*;
pub use result::*;
