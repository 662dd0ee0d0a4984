pub mod frontmatter;
pub mod patterns;
pub mod preprocess;
pub mod properties;
pub mod sections;

pub use frontmatter::{
    build_frontmatter, normalize_content, normalize_key, split_frontmatter, split_lines,
    validate_frontmatter, yaml_escape,
};
pub use patterns::{HeadingMatch, ListItemMatch, NotePatterns, PropertyMatch};
pub use preprocess::{preprocess_line, preprocess_lines};
pub use properties::{parse_properties_block, PropertyBlock};
pub use sections::SectionExtractor;
