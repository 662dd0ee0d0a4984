pub mod config;
pub mod note;

pub use config::{ConvertConfig, HeadingCase};
pub use note::{ConvertedNote, NoteLine, PropertyMap, SourceNote};
