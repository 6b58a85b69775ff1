pub mod error;
pub mod loading;
pub mod place_search;

pub use place_search::PlaceSearch;
