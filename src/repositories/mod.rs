//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad, cada uno dueño de sus queries SQL.
//! Las escrituras que disparan alertas exponen variantes `_in_tx` para
//! ejecutarse dentro de la transacción del llamador.

pub mod alert_repository;
pub mod battery_record_repository;
pub mod inspection_repository;
pub mod location_repository;
pub mod maintenance_repository;
pub mod shift_repository;
pub mod user_repository;
pub mod vehicle_repository;
