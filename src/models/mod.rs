pub mod cart_item;
pub mod listing;
pub mod product;
pub mod profile;
pub mod wishlist_item;

pub use cart_item::*;
pub use listing::*;
pub use product::*;
pub use profile::*;
pub use wishlist_item::*;
