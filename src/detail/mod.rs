mod view;

pub use view::{stock_label, DetailState, DetailView};
