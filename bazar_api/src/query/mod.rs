mod common;
pub use self::common::{Query, QueryCommon};
mod item;
pub use self::item::ItemQuery;
