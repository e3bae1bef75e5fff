pub use super::cafes::Entity as Cafes;
