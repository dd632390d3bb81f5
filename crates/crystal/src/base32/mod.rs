mod interface;
mod rfc4648;

pub use interface::*;
