pub mod dealer;
pub mod door_sample;
pub mod door_style;
pub mod facet;
pub mod gallery_sample;
pub mod image_type;
pub mod shared;
pub mod upload;
