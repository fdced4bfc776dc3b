//! DTO validation helpers.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{AppError, AppResult};

/// Run the `validator` rules of a DTO, mapping failures to `AppError::Validation`.
pub fn validate_dto<T: Validate>(dto: &T) -> AppResult<()> {
    dto.validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))
}

/// Format validation errors into a user-friendly string, nested structs included.
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.join(", ")
}

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by_key(|(field, _)| **field);

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errs) => out.extend(errs.iter().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} es inválido", field))
            })),
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CreateUsuario, RolUsuario};

    fn dto(nombre: &str) -> CreateUsuario {
        CreateUsuario {
            username: "nuevo".to_string(),
            email: "nuevo@email.com".to_string(),
            password: "Clave1234".to_string(),
            nombre: nombre.to_string(),
            apellido: "Pérez".to_string(),
            telefono: None,
            rol: RolUsuario::Cliente,
        }
    }

    #[test]
    fn test_valid_dto_passes() {
        assert!(validate_dto(&dto("Juan")).is_ok());
    }

    #[test]
    fn test_short_nombre_is_rejected() {
        let err = validate_dto(&dto(" J ")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.user_message().contains("Nombre"));
    }
}
