pub mod entry;
pub mod prediction;
pub mod settings;
pub mod stats;
pub mod time_range;
