//! Utilidades del sistema
//!
//! Este módulo contiene helpers de validación y el sistema de errores.

pub mod errors;
pub mod validation;
