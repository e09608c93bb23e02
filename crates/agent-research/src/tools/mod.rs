//! Tools exposed to the research agents

pub mod news;
pub mod stock_data;

pub use news::NewsTool;
pub use stock_data::{StockSnapshot, StockTool};
