pub mod colour;
pub mod dealer;
pub mod door_sample;
pub mod door_style;
pub mod door_style_door_style_type;
pub mod door_style_type;
pub mod gallery_sample;
pub mod image;
pub mod image_type;
pub mod wood;
