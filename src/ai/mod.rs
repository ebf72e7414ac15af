pub mod search;

pub use search::{Move, SearchStats, Searcher};
