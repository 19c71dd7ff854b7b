pub mod domain;

pub use domain::entities::{AnimeFields, AnimeRecord};
pub use domain::repositories::AnimeRepository;
pub use domain::value_objects::AiringStatus;
