mod meta;
pub use self::meta::SearchResults;

mod item;
pub use self::item::{Item, ItemID};

mod category;
pub use self::category::Category;

mod new_item;
pub use self::new_item::{ImageUpload, NewItem};
