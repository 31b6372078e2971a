// handlers/mod.rs - one function per route
//
// pages:  server-rendered views (/, /page1-4) and the not-found fallback
// cats:   JSON cat endpoints (/getName, /setName, /searchName, /updateLast)
// dogs:   JSON dog endpoints (/setDogName, /searchDogName)
// health: store liveness (/health)
pub mod cats;
pub mod dogs;
pub mod health;
pub mod pages;
