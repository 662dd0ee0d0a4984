//! Property Block Parser
//!
//! A note's metadata lives under a `#.properties` marker as `key:: value`
//! lines. Only the first block is read. Blank lines inside the block are
//! tolerated; a heading or any other non-property line ends it.

use crate::models::{NoteLine, PropertyMap};
use crate::parser::patterns::NotePatterns;

/// Properties parsed from a note plus how many leading lines they used
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBlock {
    pub properties: PropertyMap,
    /// Lines from the start of the note up to and including the last
    /// property line; section extraction starts after them
    pub consumed: usize,
}

/// Parse the property block from preprocessed lines
///
/// Lines before the marker are ignored. If no marker is found the mapping is
/// empty and `consumed` is 0.
pub fn parse_properties_block(patterns: &NotePatterns, lines: &[NoteLine]) -> PropertyBlock {
    let mut block = PropertyBlock::default();
    let mut in_props = false;

    for (i, line) in lines.iter().enumerate() {
        let text = line.clean.trim();

        if patterns.is_properties_marker(text) {
            in_props = true;
            continue;
        }
        if !in_props {
            continue;
        }

        if patterns.heading(text).is_some() {
            break;
        }

        if let Some(prop) = patterns.property(text) {
            block.properties.insert(prop.key, prop.value);
            block.consumed = i + 1;
        } else if text.is_empty() {
            continue;
        } else {
            break;
        }
    }

    block
}
