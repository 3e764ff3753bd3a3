pub use classbook_models::schedules::*;
