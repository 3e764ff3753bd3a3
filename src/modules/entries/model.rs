pub use classbook_models::entries::*;
