pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, NormalizedError};
pub use traits::QueryExecutor;
pub use types::{QueryArgs, ToolInvocation, EXECUTE_QUERY};
