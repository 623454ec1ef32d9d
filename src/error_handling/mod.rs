mod error;

pub use error::Error;
pub use error::Result;
pub use error::ValidationError;
