//! Identity document and postal address value objects.

use serde::Serialize;

use crate::constants::{
    MAX_DIGITOS_CEDULA, MAX_DIGITOS_EXTRANJERIA, MAX_DIGITOS_PASSPORT, MIN_DIGITOS_DOCUMENTO,
};
use crate::error::{DomainError, DomainResult};

string_enum! {
    /// Kinds of identity document a cliente may present.
    pub enum TipoDocumento ("Tipo de documento") {
        Cedula => "CEDULA",
        Passport => "PASSPORT",
        Extranjeria => "EXTRANJERIA",
    }
}

impl TipoDocumento {
    /// Inclusive bounds on the number of digits.
    pub fn rango_digitos(&self) -> (usize, usize) {
        match self {
            TipoDocumento::Cedula => (MIN_DIGITOS_DOCUMENTO, MAX_DIGITOS_CEDULA),
            TipoDocumento::Passport => (MIN_DIGITOS_DOCUMENTO, MAX_DIGITOS_PASSPORT),
            TipoDocumento::Extranjeria => (MIN_DIGITOS_DOCUMENTO, MAX_DIGITOS_EXTRANJERIA),
        }
    }
}

/// Document number reduced to its digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NumeroDocumento(String);

impl NumeroDocumento {
    pub fn new(numero: &str, tipo: TipoDocumento) -> DomainResult<Self> {
        let limpio = Self::limpiar(numero);
        let (min, max) = tipo.rango_digitos();

        if limpio.len() < min || limpio.len() > max {
            return Err(DomainError::validation(format!(
                "Número de documento {} inválido",
                tipo
            )));
        }
        Ok(Self(limpio))
    }

    /// Strip every non-digit character.
    pub fn limpiar(numero: &str) -> String {
        numero.chars().filter(char::is_ascii_digit).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NumeroDocumento {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Postal address. Street, city and department are mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Direccion {
    calle: String,
    ciudad: String,
    departamento: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    codigo_postal: Option<String>,
}

impl Direccion {
    pub fn new(
        calle: &str,
        ciudad: &str,
        departamento: &str,
        codigo_postal: Option<&str>,
    ) -> DomainResult<Self> {
        let (calle, ciudad, departamento) = (calle.trim(), ciudad.trim(), departamento.trim());
        if calle.is_empty() || ciudad.is_empty() || departamento.is_empty() {
            return Err(DomainError::validation(
                "Calle, ciudad y departamento son obligatorios",
            ));
        }

        Ok(Self {
            calle: calle.to_string(),
            ciudad: ciudad.to_string(),
            departamento: departamento.to_string(),
            codigo_postal: codigo_postal
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }

    pub fn calle(&self) -> &str {
        &self.calle
    }

    pub fn ciudad(&self) -> &str {
        &self.ciudad
    }

    pub fn departamento(&self) -> &str {
        &self.departamento
    }

    pub fn codigo_postal(&self) -> Option<&str> {
        self.codigo_postal.as_deref()
    }
}

impl std::fmt::Display for Direccion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.calle, self.ciudad, self.departamento)?;
        if let Some(codigo) = &self.codigo_postal {
            write!(f, " ({})", codigo)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numero_documento_strips_non_digits() {
        let numero = NumeroDocumento::new("12.345-678", TipoDocumento::Cedula).unwrap();
        assert_eq!(numero.as_str(), "12345678");
    }

    #[test]
    fn test_numero_documento_length_per_tipo() {
        let once = "12345678901";
        assert!(NumeroDocumento::new(once, TipoDocumento::Cedula).is_err());
        assert!(NumeroDocumento::new(once, TipoDocumento::Extranjeria).is_ok());
        assert!(NumeroDocumento::new(once, TipoDocumento::Passport).is_ok());

        assert!(NumeroDocumento::new("12345", TipoDocumento::Passport).is_err());
        assert!(NumeroDocumento::new("1234567890123", TipoDocumento::Extranjeria).is_err());
        assert!(NumeroDocumento::new("123456789012345", TipoDocumento::Passport).is_ok());
    }

    #[test]
    fn test_passport_letters_are_dropped_before_length_check() {
        let numero = NumeroDocumento::new("AB1234567", TipoDocumento::Passport).unwrap();
        assert_eq!(numero.as_str(), "1234567");
    }

    #[test]
    fn test_tipo_documento_from_str() {
        assert_eq!("cedula".parse::<TipoDocumento>().unwrap(), TipoDocumento::Cedula);
        assert!("DNI".parse::<TipoDocumento>().is_err());
    }

    #[test]
    fn test_direccion_requires_core_fields() {
        assert!(Direccion::new("  ", "Bogotá", "Cundinamarca", None).is_err());
        assert!(Direccion::new("Calle 1", "", "Cundinamarca", None).is_err());
        assert!(Direccion::new("Calle 1", "Bogotá", " ", None).is_err());
    }

    #[test]
    fn test_direccion_display_and_equality() {
        let a = Direccion::new(" Calle 123 ", "Bogotá", "Cundinamarca", Some("110111")).unwrap();
        let b = Direccion::new("Calle 123", "Bogotá", "Cundinamarca", Some(" 110111 ")).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Calle 123, Bogotá, Cundinamarca (110111)");
    }

    #[test]
    fn test_direccion_blank_postal_code_is_absent() {
        let d = Direccion::new("Calle 1", "Cali", "Valle", Some("   ")).unwrap();
        assert_eq!(d.codigo_postal(), None);
        assert_eq!(d.to_string(), "Calle 1, Cali, Valle");
    }
}
