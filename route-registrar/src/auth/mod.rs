mod access_token;
mod command_token_source;
mod token_source;

pub use access_token::AccessToken;
pub use command_token_source::CommandTokenSource;
pub use token_source::{StaticTokenSource, TokenSource};
