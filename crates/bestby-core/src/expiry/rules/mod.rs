//! Rule-based building blocks of the disambiguation engine.

pub mod dates;
pub mod duration;
pub mod lines;
pub mod normalize;
pub mod patterns;

pub use dates::{DateGrammar, find_all_dates, parse_date};
pub use duration::{ShelfLife, ShelfUnit, parse_shelf_life};
pub use lines::{Line, Role, classify_lines};
pub use normalize::normalize_date_token;
