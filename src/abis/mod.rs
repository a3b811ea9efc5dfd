pub mod converter;
pub mod erc20;

pub use converter::{Conversion, IBancorConverter};
pub use erc20::IERC20;
