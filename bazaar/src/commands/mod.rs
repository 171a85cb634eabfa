pub mod executor;
pub mod parser;

pub use executor::{Console, Response};
pub use parser::parse_line;
