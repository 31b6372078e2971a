pub mod cat;
pub mod dog;

pub use cat::{Cat, CatSummary, NewCat};
pub use dog::{Dog, DogSummary, NewDog};
