mod atomic;
mod status;

pub use atomic::*;
pub use status::*;
