pub mod decay;
pub mod forecast;
pub mod recommender;
