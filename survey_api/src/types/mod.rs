mod meta;
pub use self::meta::{Count, ErrorBody};

mod submission;
pub use self::submission::{
    ConstrainedAnswer, FreestyleAnswer, NewSubmission, Submission, SubmissionId,
};

mod survey;
pub use self::survey::{SurveyDescriptor, SurveyId};

mod token;
pub use self::token::{AccessToken, NewTokens, TokenEmails, TokenId};

mod user;
pub use self::user::{Credentials, LoginResponse, PasswordConfirmation, UserInfo, UserUpdate};
