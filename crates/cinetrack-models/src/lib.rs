pub mod movie;
pub mod normalize;
pub mod seed;
pub mod watched;

pub use movie::{MovieEntry, MovieRecord, RATING_NOT_AVAILABLE};
pub use normalize::{generate_movie_id, normalize};
pub use seed::seed_movies;
pub use watched::{InvalidPersonalRating, PersonalRating, WatchedRecord};
