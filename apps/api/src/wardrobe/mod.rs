// Wardrobe inventory: items, photos, usage and favourites.

pub mod compress;
pub mod handlers;
pub mod matching;
pub mod service;
pub mod storage;
pub mod store;
