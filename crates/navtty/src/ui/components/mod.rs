pub mod confirm;
pub mod input_box;
pub mod message;
pub mod picker;
