//! Modelos de dominio
//!
//! Structs que mapean directamente a las tablas del schema
//! más los tipos de sesión en memoria.

pub mod alert;
pub mod battery_record;
pub mod inspection;
pub mod location;
pub mod maintenance;
pub mod session;
pub mod shift;
pub mod user;
pub mod vehicle;
