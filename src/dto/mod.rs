//! DTOs de la API
//!
//! Requests y responses por entidad. El contrato de wire es camelCase
//! porque los clientes móviles existentes lo esperan así.

pub mod alert_dto;
pub mod auth_dto;
pub mod battery_record_dto;
pub mod common_dto;
pub mod inspection_dto;
pub mod location_dto;
pub mod maintenance_dto;
pub mod report_dto;
pub mod shift_dto;
pub mod user_dto;
pub mod vehicle_dto;
