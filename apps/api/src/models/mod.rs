pub mod daily;
pub mod profile;
pub mod suggestion;
pub mod user;
pub mod wardrobe;
