mod movie;
mod person;
mod user;

pub use movie::{ChatMovie, Movie, MovieCard, SimilarMovie};
pub use person::PersonRef;
pub use user::User;
