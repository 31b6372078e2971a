pub mod fields;
pub mod response;

pub use fields::RequiredFields;
pub use response::{ApiResponse, ApiResult};
