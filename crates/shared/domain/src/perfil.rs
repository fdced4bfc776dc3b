//! Emprendedor profile value objects: specialty, biography and social accounts.

use serde::Serialize;
use url::Url;

use crate::constants::{
    MAX_BIOGRAFIA_LENGTH, MAX_ESPECIALIDAD_LENGTH, MAX_NOMBRE_USUARIO_RED,
    MIN_BIOGRAFIA_LENGTH, MIN_ESPECIALIDAD_LENGTH, MIN_NOMBRE_USUARIO_RED,
    RESUMEN_BIOGRAFIA_LENGTH,
};
use crate::error::{DomainError, DomainResult};

string_enum! {
    /// Supported social platforms.
    pub enum PlataformaRedSocial ("Plataforma de red social") {
        Instagram => "INSTAGRAM",
        Facebook => "FACEBOOK",
        Twitter => "TWITTER",
        Linkedin => "LINKEDIN",
        Youtube => "YOUTUBE",
        Tiktok => "TIKTOK",
        Whatsapp => "WHATSAPP",
    }
}

fn longitud_en_rango(texto: &str, min: usize, max: usize) -> bool {
    let len = texto.chars().count();
    len >= min && len <= max
}

/// Area of expertise, 3 to 50 characters once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Especialidad(String);

impl Especialidad {
    pub fn new(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if !longitud_en_rango(trimmed, MIN_ESPECIALIDAD_LENGTH, MAX_ESPECIALIDAD_LENGTH) {
            return Err(DomainError::validation(
                "Especialidad debe tener entre 3 y 50 caracteres",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Especialidad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text biography, 10 to 500 characters once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Biografia(String);

impl Biografia {
    pub fn new(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if !longitud_en_rango(trimmed, MIN_BIOGRAFIA_LENGTH, MAX_BIOGRAFIA_LENGTH) {
            return Err(DomainError::validation(
                "Biografía debe tener entre 10 y 500 caracteres",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 100 characters followed by `...`, or the whole text if shorter.
    pub fn resumen(&self) -> String {
        if self.0.chars().count() > RESUMEN_BIOGRAFIA_LENGTH {
            let corte: String = self.0.chars().take(RESUMEN_BIOGRAFIA_LENGTH).collect();
            format!("{}...", corte)
        } else {
            self.0.clone()
        }
    }
}

impl std::fmt::Display for Biografia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A social account: platform, profile url and handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedSocial {
    plataforma: PlataformaRedSocial,
    url: String,
    nombre_usuario: String,
}

impl RedSocial {
    pub fn new(plataforma: PlataformaRedSocial, url: &str, nombre_usuario: &str) -> DomainResult<Self> {
        let url = url.trim();
        if Url::parse(url).is_err() {
            return Err(DomainError::invalid_format("URL de red social inválida"));
        }

        let nombre_usuario = nombre_usuario.trim();
        if !longitud_en_rango(nombre_usuario, MIN_NOMBRE_USUARIO_RED, MAX_NOMBRE_USUARIO_RED) {
            return Err(DomainError::validation(
                "Nombre de usuario de red social inválido",
            ));
        }

        Ok(Self {
            plataforma,
            url: url.to_lowercase(),
            nombre_usuario: nombre_usuario.to_string(),
        })
    }

    pub fn plataforma(&self) -> PlataformaRedSocial {
        self.plataforma
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn nombre_usuario(&self) -> &str {
        &self.nombre_usuario
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_especialidad_bounds() {
        assert!(Especialidad::new("  ab  ").is_err());
        assert_eq!(Especialidad::new(" Diseño ").unwrap().as_str(), "Diseño");
        assert!(Especialidad::new(&"x".repeat(50)).is_ok());
        assert!(Especialidad::new(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_biografia_bounds() {
        assert!(Biografia::new("muy corta").is_err());
        assert!(Biografia::new("diez letra").is_ok());
        assert!(Biografia::new(&"b".repeat(500)).is_ok());
        assert!(Biografia::new(&"b".repeat(501)).is_err());
    }

    #[test]
    fn test_biografia_resumen() {
        let corta = Biografia::new("Chef profesional en Cali").unwrap();
        assert_eq!(corta.resumen(), "Chef profesional en Cali");

        let larga = Biografia::new(&"ñ".repeat(150)).unwrap();
        let resumen = larga.resumen();
        assert!(resumen.ends_with("..."));
        assert_eq!(resumen.chars().count(), 103);
    }

    #[test]
    fn test_red_social_validates_url_and_handle() {
        assert!(RedSocial::new(PlataformaRedSocial::Instagram, "no es url", "chef").is_err());
        assert!(RedSocial::new(PlataformaRedSocial::Instagram, "https://instagram.com/chef", " ").is_err());
        assert!(RedSocial::new(
            PlataformaRedSocial::Instagram,
            "https://instagram.com/chef",
            &"c".repeat(31)
        )
        .is_err());
    }

    #[test]
    fn test_red_social_normalizes_url() {
        let red = RedSocial::new(
            PlataformaRedSocial::Youtube,
            " https://YouTube.com/c/DiegoGourmet ",
            " DiegoGourmet ",
        )
        .unwrap();

        assert_eq!(red.url(), "https://youtube.com/c/diegogourmet");
        assert_eq!(red.nombre_usuario(), "DiegoGourmet");
    }
}
