mod series;
mod token;

pub use series::{Collection, Projection, SeriesRecord, TimeRange};
pub use token::Token;
