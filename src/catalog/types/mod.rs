mod credits;
mod movie;

pub use credits::{CastMember, Credits, CrewMember};
pub use movie::{Genre, GenreId, Movie, MovieDetails, MovieId, SearchResults, Video};
