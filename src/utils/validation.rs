//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Verificar que una referencia opcional (URL de foto, firma...) está presente
/// y no vacía. El contenido del blob no se valida nunca, solo la referencia.
pub fn has_reference(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.trim().is_empty())
}

/// Validar un número de téléphone en formato E.164 simplificado
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if rest.is_empty() || rest.len() < 6 || !rest.chars().all(|c| c.is_ascii_digit()) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_reference() {
        assert!(has_reference(&Some("https://storage/photo.jpg".to_string())));
        assert!(!has_reference(&Some("   ".to_string())));
        assert!(!has_reference(&None));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+33600000000").is_ok());
        assert!(validate_phone("0600000000").is_ok());
        assert!(validate_phone("abc").is_err());
        assert!(validate_phone("+33").is_err());
    }

    #[test]
    fn test_validate_datetime() {
        assert!(validate_datetime("2025-06-01T08:30:00Z").is_ok());
        assert!(validate_datetime("2025-06-01 08:30").is_err());
    }
}
