mod doh;
mod record;
mod set;

pub use doh::*;
pub use record::*;
pub use set::*;
