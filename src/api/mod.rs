pub mod generate_image;
pub mod page;

pub use generate_image::__path_handle_generate_image;
pub use generate_image::{handle_generate_image, GenerateImageQuery};
pub use page::handle_index;
