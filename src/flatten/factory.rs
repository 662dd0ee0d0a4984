use crate::flatten::basic::{BulletsFlattener, NoneFlattener, UnwrapFlattener};
use crate::flatten::heuristic::HeuristicFlattener;
use crate::flatten::smart_list::SmartListFlattener;
use crate::flatten::strategy::{FlattenMode, Flattener};

/// Factory for creating flattener instances
///
/// Maps a [`FlattenMode`] chosen on the command line or in the config file
/// to its implementation.
pub struct FlattenerFactory;

impl FlattenerFactory {
    pub fn create(mode: FlattenMode) -> Box<dyn Flattener> {
        match mode {
            FlattenMode::None => Box::new(NoneFlattener),
            FlattenMode::Unwrap => Box::new(UnwrapFlattener),
            FlattenMode::Bullets => Box::new(BulletsFlattener),
            FlattenMode::Heuristic => Box::new(HeuristicFlattener),
            FlattenMode::SmartList => Box::new(SmartListFlattener),
        }
    }
}
