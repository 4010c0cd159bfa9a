mod mcp;

pub use mcp::{handle_message, SERVER_NAME};
