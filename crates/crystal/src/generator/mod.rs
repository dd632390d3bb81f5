mod atomic;
mod interface;
mod lock;
mod mutex;
mod state;
mod status;

pub use atomic::*;
pub use interface::*;
pub use lock::*;
pub use status::*;
