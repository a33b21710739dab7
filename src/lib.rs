pub mod banner;
pub mod check;
pub mod oracle;
pub mod script;
pub mod sink;
pub mod value;

pub use check::check;
pub use oracle::{run, transcript};
