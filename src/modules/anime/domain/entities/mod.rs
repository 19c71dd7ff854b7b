pub mod anime;

pub use anime::{AnimeFields, AnimeRecord, AIRING_TZ};
