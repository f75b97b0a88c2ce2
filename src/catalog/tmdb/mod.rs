mod api_types;
mod gateway;

pub use gateway::TmdbGateway;
