//! Controllers de la API
//!
//! Un controller por entidad, construido por request con el pool.
//! Los handlers de routes/ hacen la autenticación y autorización; aquí
//! viven las reglas de negocio y la orquestación de repositorios.

pub mod alert_controller;
pub mod auth_controller;
pub mod battery_record_controller;
pub mod inspection_controller;
pub mod location_controller;
pub mod maintenance_controller;
pub mod report_controller;
pub mod shift_controller;
pub mod user_controller;
pub mod vehicle_controller;
