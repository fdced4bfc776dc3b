//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Usuario
// =============================================================================

/// Username pattern: 3 to 20 alphanumeric or underscore characters
pub const USERNAME_PATTERN: &str = r"^[a-zA-Z0-9_]{3,20}$";

/// Loose email pattern (something@something.tld, no whitespace)
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Characters allowed in a password
pub const PASSWORD_CHARSET_PATTERN: &str = r"^[a-zA-Z\d@$!%*?&]+$";

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Personas (shared by all entities)
// =============================================================================

/// Minimum trimmed length for nombre and apellido
pub const MIN_NOMBRE_LENGTH: usize = 2;

/// Minimum trimmed length for telefono
pub const MIN_TELEFONO_LENGTH: usize = 10;

// =============================================================================
// Cliente
// =============================================================================

/// Minimum age (in years) for a new cliente
pub const EDAD_MINIMA_CLIENTE: u32 = 18;

/// Minimum digits in any document number
pub const MIN_DIGITOS_DOCUMENTO: usize = 6;

/// Maximum digits for a cedula
pub const MAX_DIGITOS_CEDULA: usize = 10;

/// Maximum digits for a passport
pub const MAX_DIGITOS_PASSPORT: usize = 15;

/// Maximum digits for a cedula de extranjeria
pub const MAX_DIGITOS_EXTRANJERIA: usize = 12;

// =============================================================================
// Emprendedor
// =============================================================================

/// Especialidad length bounds (trimmed, in characters)
pub const MIN_ESPECIALIDAD_LENGTH: usize = 3;
pub const MAX_ESPECIALIDAD_LENGTH: usize = 50;

/// Biografia length bounds (trimmed, in characters)
pub const MIN_BIOGRAFIA_LENGTH: usize = 10;
pub const MAX_BIOGRAFIA_LENGTH: usize = 500;

/// Characters of biografia kept in the summary view
pub const RESUMEN_BIOGRAFIA_LENGTH: usize = 100;

/// Social network handle length bounds (trimmed)
pub const MIN_NOMBRE_USUARIO_RED: usize = 1;
pub const MAX_NOMBRE_USUARIO_RED: usize = 30;

/// Rating scale
pub const PUNTUACION_MINIMA: f64 = 0.0;
pub const PUNTUACION_MAXIMA: f64 = 5.0;

/// Rating at or above which an emprendedor counts as well rated
pub const PUNTUACION_BUENA: f64 = 4.0;

/// Default size of the top-rated listing
pub const DEFAULT_LIMITE_MEJOR_PUNTUADOS: usize = 10;
