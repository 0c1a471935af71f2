// Entity Models
//
// A single `Animal` record with a species tag. Species is data, not a type:
// the recognised set lives in `SpeciesCatalog` and comes from configuration.

pub mod animal;

pub use animal::Animal;
