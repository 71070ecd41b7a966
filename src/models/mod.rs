pub mod hurricane_alert;
pub mod product;
