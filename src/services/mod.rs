//! Servicios de negocio
//!
//! Este módulo contiene los motores de decisión del sistema: sesiones,
//! autorización por rol, validación de conformité, generación de alertas
//! y resolución del estado de sécurité de un vehículo.

pub mod alert_service;
pub mod compliance_service;
pub mod role_gate;
pub mod session_service;
pub mod vehicle_safety_service;
