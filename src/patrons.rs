use crate::core::domain::Identifiable;

pub mod domain;
pub mod dto;
pub mod factory;
pub mod repository;

pub trait Patron: Identifiable {
    fn first_name(&self) -> &str;
    fn email(&self) -> &str;
    // "first last", as shown next to checkouts and holds
    fn display_name(&self) -> String;
}
