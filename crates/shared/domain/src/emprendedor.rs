//! Emprendedor domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{PUNTUACION_BUENA, PUNTUACION_MAXIMA, PUNTUACION_MINIMA};
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::identity::Email;
use crate::perfil::{Biografia, Especialidad, PlataformaRedSocial, RedSocial};
use crate::validation::{apellido_valido, nombre_valido, telefono_valido};

string_enum! {
    /// Emprendedor lifecycle status.
    pub enum EstadoEmprendedor ("Estado de emprendedor") {
        Activo => "ACTIVO",
        Inactivo => "INACTIVO",
        PendienteVerificacion => "PENDIENTE_VERIFICACION",
        Verificado => "VERIFICADO",
        Suspendido => "SUSPENDIDO",
    }
}

string_enum! {
    /// Experience levels.
    pub enum NivelExperiencia ("Nivel de experiencia") {
        Principiante => "PRINCIPIANTE",
        Intermedio => "INTERMEDIO",
        Avanzado => "AVANZADO",
        Experto => "EXPERTO",
    }
}

string_enum! {
    /// Business sectors.
    pub enum SectorEmprendimiento ("Sector de emprendimiento") {
        Tecnologia => "TECNOLOGIA",
        Alimentacion => "ALIMENTACION",
        Moda => "MODA",
        Salud => "SALUD",
        Educacion => "EDUCACION",
        Servicios => "SERVICIOS",
        Comercio => "COMERCIO",
        Turismo => "TURISMO",
        Arte => "ARTE",
        Deportes => "DEPORTES",
    }
}

fn clamp_puntuacion(valor: f64) -> f64 {
    if valor.is_nan() {
        return PUNTUACION_MINIMA;
    }
    valor.clamp(PUNTUACION_MINIMA, PUNTUACION_MAXIMA)
}

/// Reject a list that names the same platform twice.
fn sin_plataformas_repetidas(redes: &[RedSocial]) -> DomainResult<()> {
    for (i, red) in redes.iter().enumerate() {
        if redes[..i].iter().any(|r| r.plataforma() == red.plataforma()) {
            return Err(DomainError::DuplicatePlatform(red.plataforma()));
        }
    }
    Ok(())
}

/// Emprendedor domain entity
#[derive(Debug, Clone)]
pub struct Emprendedor {
    id: String,
    nombre: String,
    apellido: String,
    email: Email,
    telefono: String,
    especialidad: Especialidad,
    biografia: Biografia,
    sector: SectorEmprendimiento,
    experiencia: NivelExperiencia,
    estado: EstadoEmprendedor,
    usuario_id: Option<String>,
    redes_sociales: Vec<RedSocial>,
    fecha_verificacion: Option<DateTime<Utc>>,
    puntuacion: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Emprendedor {
    /// Create a new emprendedor pending verification, with no rating.
    ///
    /// # Errors
    /// Returns `DuplicatePlatform` if two social accounts share a platform.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        nombre: String,
        apellido: String,
        email: Email,
        telefono: String,
        especialidad: Especialidad,
        biografia: Biografia,
        sector: SectorEmprendimiento,
        experiencia: NivelExperiencia,
        usuario_id: Option<String>,
        redes_sociales: Vec<RedSocial>,
    ) -> DomainResult<Self> {
        sin_plataformas_repetidas(&redes_sociales)?;

        let now = Utc::now();
        Ok(Self {
            id,
            nombre,
            apellido,
            email,
            telefono,
            especialidad,
            biografia,
            sector,
            experiencia,
            estado: EstadoEmprendedor::PendienteVerificacion,
            usuario_id,
            redes_sociales,
            fecha_verificacion: None,
            puntuacion: PUNTUACION_MINIMA,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn apellido(&self) -> &str {
        &self.apellido
    }

    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn telefono(&self) -> &str {
        &self.telefono
    }

    pub fn especialidad(&self) -> &Especialidad {
        &self.especialidad
    }

    pub fn biografia(&self) -> &Biografia {
        &self.biografia
    }

    pub fn sector(&self) -> SectorEmprendimiento {
        self.sector
    }

    pub fn experiencia(&self) -> NivelExperiencia {
        self.experiencia
    }

    pub fn estado(&self) -> EstadoEmprendedor {
        self.estado
    }

    pub fn usuario_id(&self) -> Option<&str> {
        self.usuario_id.as_deref()
    }

    pub fn redes_sociales(&self) -> &[RedSocial] {
        &self.redes_sociales
    }

    pub fn fecha_verificacion(&self) -> Option<DateTime<Utc>> {
        self.fecha_verificacion
    }

    pub fn puntuacion(&self) -> f64 {
        self.puntuacion
    }

    /// Apply the provided subset of fields.
    ///
    /// Every value object is built first; on error nothing is changed.
    pub fn actualizar_informacion(&mut self, datos: &UpdateEmprendedor) -> DomainResult<()> {
        let especialidad = datos
            .especialidad
            .as_deref()
            .filter(|e| !e.is_empty())
            .map(Especialidad::new)
            .transpose()?;
        let biografia = datos
            .biografia
            .as_deref()
            .filter(|b| !b.is_empty())
            .map(Biografia::new)
            .transpose()?;
        let redes_sociales = datos
            .redes_sociales
            .as_ref()
            .map(|redes| RedSocialInput::to_redes(redes))
            .transpose()?;

        if let Some(nombre) = datos.nombre.as_deref().filter(|n| !n.is_empty()) {
            self.nombre = nombre.to_string();
        }
        if let Some(apellido) = datos.apellido.as_deref().filter(|a| !a.is_empty()) {
            self.apellido = apellido.to_string();
        }
        if let Some(telefono) = datos.telefono.as_deref().filter(|t| !t.is_empty()) {
            self.telefono = telefono.to_string();
        }
        if let Some(especialidad) = especialidad {
            self.especialidad = especialidad;
        }
        if let Some(biografia) = biografia {
            self.biografia = biografia;
        }
        if let Some(sector) = datos.sector {
            self.sector = sector;
        }
        if let Some(experiencia) = datos.experiencia {
            self.experiencia = experiencia;
        }
        if let Some(estado) = datos.estado {
            self.estado = estado;
        }
        if let Some(redes_sociales) = redes_sociales {
            self.redes_sociales = redes_sociales;
        }
        self.touch();
        Ok(())
    }

    /// Mark as verified. The verification date is recorded only the first time.
    pub fn verificar(&mut self) {
        let now = Utc::now();
        self.estado = EstadoEmprendedor::Verificado;
        self.fecha_verificacion.get_or_insert(now);
        self.updated_at = now;
    }

    pub fn suspender(&mut self) {
        self.estado = EstadoEmprendedor::Suspendido;
        self.touch();
    }

    pub fn activar(&mut self) {
        self.estado = EstadoEmprendedor::Activo;
        self.touch();
    }

    pub fn desactivar(&mut self) {
        self.estado = EstadoEmprendedor::Inactivo;
        self.touch();
    }

    /// Add a social account.
    ///
    /// # Errors
    /// `DuplicatePlatform` if the platform already has an account.
    pub fn agregar_red_social(&mut self, red: RedSocial) -> DomainResult<()> {
        if self.tiene_red_social(red.plataforma()) {
            return Err(DomainError::DuplicatePlatform(red.plataforma()));
        }
        self.redes_sociales.push(red);
        self.touch();
        Ok(())
    }

    /// Remove the account for `plataforma`, returning whether one existed.
    pub fn remover_red_social(&mut self, plataforma: PlataformaRedSocial) -> bool {
        match self
            .redes_sociales
            .iter()
            .position(|r| r.plataforma() == plataforma)
        {
            Some(indice) => {
                self.redes_sociales.remove(indice);
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn tiene_red_social(&self, plataforma: PlataformaRedSocial) -> bool {
        self.redes_sociales.iter().any(|r| r.plataforma() == plataforma)
    }

    /// Set the rating, clamped to [0, 5].
    pub fn actualizar_puntuacion(&mut self, nueva: f64) {
        self.puntuacion = clamp_puntuacion(nueva);
        self.touch();
    }

    pub fn esta_verificado(&self) -> bool {
        self.estado == EstadoEmprendedor::Verificado
    }

    /// Active or verified.
    pub fn esta_activo(&self) -> bool {
        matches!(
            self.estado,
            EstadoEmprendedor::Activo | EstadoEmprendedor::Verificado
        )
    }

    pub fn tiene_buena_puntuacion(&self) -> bool {
        self.puntuacion >= PUNTUACION_BUENA
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Emprendedor {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Social account as received in a DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedSocialInput {
    pub plataforma: PlataformaRedSocial,
    pub url: String,
    pub nombre_usuario: String,
}

impl RedSocialInput {
    pub fn to_red_social(&self) -> DomainResult<RedSocial> {
        RedSocial::new(self.plataforma, &self.url, &self.nombre_usuario)
    }

    /// Build every account, rejecting repeated platforms.
    pub fn to_redes(inputs: &[RedSocialInput]) -> DomainResult<Vec<RedSocial>> {
        let redes = inputs
            .iter()
            .map(RedSocialInput::to_red_social)
            .collect::<DomainResult<Vec<_>>>()?;
        sin_plataformas_repetidas(&redes)?;
        Ok(redes)
    }
}

/// Emprendedor creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmprendedor {
    #[validate(custom(function = "nombre_valido"))]
    pub nombre: String,
    #[validate(custom(function = "apellido_valido"))]
    pub apellido: String,
    pub email: String,
    #[validate(custom(function = "telefono_valido"))]
    pub telefono: String,
    pub especialidad: String,
    pub biografia: String,
    pub sector: SectorEmprendimiento,
    pub experiencia: NivelExperiencia,
    pub usuario_id: Option<String>,
    #[serde(default)]
    pub redes_sociales: Vec<RedSocialInput>,
}

/// Emprendedor update data transfer object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmprendedor {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub especialidad: Option<String>,
    pub biografia: Option<String>,
    pub sector: Option<SectorEmprendimiento>,
    pub experiencia: Option<NivelExperiencia>,
    pub estado: Option<EstadoEmprendedor>,
    /// Replaces the whole list when present
    pub redes_sociales: Option<Vec<RedSocialInput>>,
}

/// Emprendedor view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmprendedorResponse {
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: String,
    pub especialidad: String,
    pub biografia: String,
    pub sector: SectorEmprendimiento,
    pub experiencia: NivelExperiencia,
    pub estado: EstadoEmprendedor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<String>,
    pub redes_sociales: Vec<RedSocialInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_verificacion: Option<DateTime<Utc>>,
    pub puntuacion: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Emprendedor> for EmprendedorResponse {
    fn from(emprendedor: &Emprendedor) -> Self {
        Self {
            id: emprendedor.id.clone(),
            nombre: emprendedor.nombre.clone(),
            apellido: emprendedor.apellido.clone(),
            email: emprendedor.email.to_string(),
            telefono: emprendedor.telefono.clone(),
            especialidad: emprendedor.especialidad.to_string(),
            biografia: emprendedor.biografia.to_string(),
            sector: emprendedor.sector,
            experiencia: emprendedor.experiencia,
            estado: emprendedor.estado,
            usuario_id: emprendedor.usuario_id.clone(),
            redes_sociales: emprendedor
                .redes_sociales
                .iter()
                .map(|r| RedSocialInput {
                    plataforma: r.plataforma(),
                    url: r.url().to_string(),
                    nombre_usuario: r.nombre_usuario().to_string(),
                })
                .collect(),
            fecha_verificacion: emprendedor.fecha_verificacion,
            puntuacion: emprendedor.puntuacion,
            created_at: emprendedor.created_at,
            updated_at: emprendedor.updated_at,
        }
    }
}

impl From<Emprendedor> for EmprendedorResponse {
    fn from(emprendedor: Emprendedor) -> Self {
        EmprendedorResponse::from(&emprendedor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linkedin() -> RedSocial {
        RedSocial::new(
            PlataformaRedSocial::Linkedin,
            "https://linkedin.com/in/laura-martinez-dev",
            "laura-martinez-dev",
        )
        .unwrap()
    }

    fn emprendedor(redes: Vec<RedSocial>) -> DomainResult<Emprendedor> {
        Emprendedor::new(
            "e-1".to_string(),
            "Laura".to_string(),
            "Martínez".to_string(),
            Email::new("laura.martinez@techstartup.com").unwrap(),
            "+57-315-7894561".to_string(),
            Especialidad::new("Desarrollo de Software").unwrap(),
            Biografia::new("Desarrolladora Full Stack con experiencia en startups").unwrap(),
            SectorEmprendimiento::Tecnologia,
            NivelExperiencia::Experto,
            None,
            redes,
        )
    }

    #[test]
    fn test_new_emprendedor_defaults() {
        let e = emprendedor(vec![]).unwrap();
        assert_eq!(e.estado(), EstadoEmprendedor::PendienteVerificacion);
        assert_eq!(e.puntuacion(), 0.0);
        assert!(e.fecha_verificacion().is_none());
        assert!(!e.esta_activo());
    }

    #[test]
    fn test_new_rejects_repeated_platform() {
        let err = emprendedor(vec![linkedin(), linkedin()]).unwrap_err();
        assert_eq!(err, DomainError::DuplicatePlatform(PlataformaRedSocial::Linkedin));
    }

    #[test]
    fn test_agregar_y_remover_red_social() {
        let mut e = emprendedor(vec![linkedin()]).unwrap();

        let err = e.agregar_red_social(linkedin()).unwrap_err();
        assert!(matches!(err, DomainError::DuplicatePlatform(PlataformaRedSocial::Linkedin)));
        assert_eq!(e.redes_sociales().len(), 1);

        let twitter = RedSocial::new(
            PlataformaRedSocial::Twitter,
            "https://twitter.com/laura_codes",
            "laura_codes",
        )
        .unwrap();
        e.agregar_red_social(twitter).unwrap();
        assert_eq!(e.redes_sociales().len(), 2);

        assert!(e.remover_red_social(PlataformaRedSocial::Linkedin));
        assert!(!e.remover_red_social(PlataformaRedSocial::Linkedin));
        assert_eq!(e.redes_sociales().len(), 1);
    }

    #[test]
    fn test_actualizar_puntuacion_clamps() {
        let mut e = emprendedor(vec![]).unwrap();

        e.actualizar_puntuacion(7.0);
        assert_eq!(e.puntuacion(), 5.0);

        e.actualizar_puntuacion(-3.0);
        assert_eq!(e.puntuacion(), 0.0);

        e.actualizar_puntuacion(f64::NAN);
        assert_eq!(e.puntuacion(), 0.0);
    }

    #[test]
    fn test_buena_puntuacion_boundary() {
        let mut e = emprendedor(vec![]).unwrap();
        e.actualizar_puntuacion(3.99);
        assert!(!e.tiene_buena_puntuacion());

        e.actualizar_puntuacion(4.0);
        assert!(e.tiene_buena_puntuacion());
    }

    #[test]
    fn test_verificar_sets_date_once() {
        let mut e = emprendedor(vec![]).unwrap();
        e.verificar();
        let primera = e.fecha_verificacion().unwrap();
        assert!(e.esta_verificado());
        assert!(e.esta_activo());

        e.suspender();
        e.verificar();
        assert_eq!(e.fecha_verificacion(), Some(primera));
    }

    #[test]
    fn test_actualizar_informacion_is_all_or_nothing() {
        let mut e = emprendedor(vec![]).unwrap();
        let result = e.actualizar_informacion(&UpdateEmprendedor {
            nombre: Some("Otra".to_string()),
            biografia: Some("corta".to_string()),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(e.nombre(), "Laura");
    }

    #[test]
    fn test_actualizar_informacion_replaces_redes() {
        let mut e = emprendedor(vec![linkedin()]).unwrap();
        e.actualizar_informacion(&UpdateEmprendedor {
            redes_sociales: Some(vec![RedSocialInput {
                plataforma: PlataformaRedSocial::Instagram,
                url: "https://instagram.com/laura".to_string(),
                nombre_usuario: "laura".to_string(),
            }]),
            sector: Some(SectorEmprendimiento::Educacion),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(e.redes_sociales().len(), 1);
        assert!(e.tiene_red_social(PlataformaRedSocial::Instagram));
        assert_eq!(e.sector(), SectorEmprendimiento::Educacion);
    }

    #[test]
    fn test_response_fields_match_getters() {
        let mut e = emprendedor(vec![linkedin()]).unwrap();
        e.actualizar_puntuacion(4.5);
        let json = serde_json::to_value(EmprendedorResponse::from(&e)).unwrap();

        assert_eq!(json["especialidad"], "Desarrollo de Software");
        assert_eq!(json["sector"], "TECNOLOGIA");
        assert_eq!(json["experiencia"], "EXPERTO");
        assert_eq!(json["estado"], "PENDIENTE_VERIFICACION");
        assert_eq!(json["puntuacion"], 4.5);
        assert_eq!(json["redesSociales"][0]["plataforma"], "LINKEDIN");
        assert_eq!(json["redesSociales"][0]["nombreUsuario"], "laura-martinez-dev");
        assert!(json.get("fechaVerificacion").is_none());
    }
}
