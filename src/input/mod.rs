//! Projection input data structures and loading

mod data;
pub mod loader;

pub use data::{PensionProfile, ProjectionInput, PromotionEvent, MAX_HIKE_FACTOR, MAX_PROMOTIONS, MIN_HIKE_FACTOR};
pub use loader::{load_input, load_input_from_reader, load_promotions, load_promotions_from_reader};
