mod client;
mod credentials;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::credentials::{CredentialProvider, NoCredential};
pub use self::errors::Error;
pub use self::query::{CountQuery, Paginated, Query, QueryCommon, SubmissionQuery, TokenQuery};
