//! Field validators used by the creation DTOs (`#[validate(custom(...))]`).

use std::borrow::Cow;

use validator::ValidationError;

use crate::constants::{MIN_NOMBRE_LENGTH, MIN_TELEFONO_LENGTH};

fn min_trimmed(value: &str, min: usize, code: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < min {
        return Err(ValidationError::new(code).with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

pub fn nombre_valido(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, MIN_NOMBRE_LENGTH, "nombre", "Nombre debe tener al menos 2 caracteres")
}

pub fn apellido_valido(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, MIN_NOMBRE_LENGTH, "apellido", "Apellido debe tener al menos 2 caracteres")
}

pub fn telefono_valido(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, MIN_TELEFONO_LENGTH, "telefono", "Teléfono debe tener al menos 10 caracteres")
}

pub fn no_vacio(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, 1, "requerido", "Dirección incompleta")
}
