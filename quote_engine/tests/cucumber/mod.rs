mod quote_world;
mod setups;
mod steps;

pub use quote_world::QuoteWorld;
