pub use classbook_models::subjects::*;
