pub mod collapsible;
pub mod table;
