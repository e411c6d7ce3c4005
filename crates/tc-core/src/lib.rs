pub mod error;
pub mod request;

pub use error::*;
pub use request::*;
