pub use classbook_models::students::*;
