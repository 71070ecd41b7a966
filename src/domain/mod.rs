pub mod hurricane_alert;
pub mod product;
pub mod stock_price;
pub mod weather;
