pub mod load;
pub mod table;
