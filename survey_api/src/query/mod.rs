mod common;
pub use self::common::{Paginated, Query, QueryCommon};
mod count;
pub use self::count::CountQuery;

mod submission;
pub use self::submission::SubmissionQuery;

mod token;
pub use self::token::TokenQuery;
