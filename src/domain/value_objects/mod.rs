pub mod enums;
pub mod image_url;
pub mod post_lifecycle;
pub mod posts;
