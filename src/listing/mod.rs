mod sort;
mod view;

pub use sort::{sort_by_price, SortOrder};
pub use view::{ListingView, PAGE_SIZE};
