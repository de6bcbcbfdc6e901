pub mod error;
pub mod impl_fake;
pub mod impl_image_dir;
pub mod interface;
