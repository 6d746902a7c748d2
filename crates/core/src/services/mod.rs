pub mod csv_service;
pub mod entry_service;
pub mod markov_service;
pub mod prediction_service;
pub mod stats_service;
