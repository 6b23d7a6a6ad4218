mod format;
mod io;

pub use format::*;
pub use io::*;
