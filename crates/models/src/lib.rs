pub mod id;
pub mod validate;
pub mod category;
pub mod client;
pub mod venue;
pub mod user;
pub mod event;
pub mod participant;

/// The six resource kinds, each backed by one store collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Category,
    Client,
    Venue,
    User,
    Event,
    Participant,
}

impl Kind {
    pub fn collection(self) -> &'static str {
        match self {
            Kind::Category => "categorias",
            Kind::Client => "clientes",
            Kind::Venue => "locals",
            Kind::User => "usuarios",
            Kind::Event => "eventos",
            Kind::Participant => "participantes",
        }
    }
}
