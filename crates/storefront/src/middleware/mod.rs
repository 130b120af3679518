pub mod validate;
pub mod visitor;

pub use self::validate::SimpleValidatedJson;
pub use self::visitor::{VISITOR_COOKIE, VisitorId, visitor_middleware};
