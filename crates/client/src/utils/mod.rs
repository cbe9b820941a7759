//! Small stateless helpers shared by the stores, handlers and CLI.

mod dates;
mod fields;
mod format;
mod query;
mod settle;
mod text;
mod validate;

pub use dates::{days_until, is_past};
pub use fields::{changed_fields, changed_fields_of};
pub use format::{format_k, percentage};
pub use query::build_query;
pub use settle::{SettleError, settle};
pub use text::{capitalize, snake_to_title, title_case};
pub use validate::{is_strong_password, is_valid_phone, is_valid_slug};
