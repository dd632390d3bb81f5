mod crystal_id;
mod layout;

pub use crystal_id::*;
pub use layout::*;
