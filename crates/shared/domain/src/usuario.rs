//! Usuario domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::Entity;
use crate::error::DomainResult;
use crate::identity::{Email, Username};
use crate::password::Password;
use crate::validation::{apellido_valido, nombre_valido};

string_enum! {
    /// Account status.
    pub enum EstadoUsuario ("Estado de usuario") {
        Activo => "ACTIVO",
        Inactivo => "INACTIVO",
        Suspendido => "SUSPENDIDO",
    }
}

string_enum! {
    /// System roles.
    pub enum RolUsuario ("Rol de usuario") {
        Administrador => "ADMINISTRADOR",
        Emprendedor => "EMPRENDEDOR",
        Cliente => "CLIENTE",
    }
}

impl RolUsuario {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, RolUsuario::Administrador)
    }
}

/// Usuario domain entity
#[derive(Debug, Clone)]
pub struct Usuario {
    id: String,
    username: Username,
    email: Email,
    password: Password,
    nombre: String,
    apellido: String,
    telefono: Option<String>,
    rol: RolUsuario,
    estado: EstadoUsuario,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Usuario {
    /// Create a new active usuario
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        username: Username,
        email: Email,
        password: Password,
        nombre: String,
        apellido: String,
        rol: RolUsuario,
        telefono: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            password,
            nombre,
            apellido,
            telefono,
            rol,
            estado: EstadoUsuario::Activo,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
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

    pub fn telefono(&self) -> Option<&str> {
        self.telefono.as_deref()
    }

    pub fn rol(&self) -> RolUsuario {
        self.rol
    }

    pub fn estado(&self) -> EstadoUsuario {
        self.estado
    }

    /// Apply the provided subset of fields.
    ///
    /// Empty names are ignored; an empty telefono clears it.
    pub fn actualizar_informacion(&mut self, datos: &UpdateUsuario) {
        if let Some(nombre) = datos.nombre.as_deref().filter(|n| !n.is_empty()) {
            self.nombre = nombre.to_string();
        }
        if let Some(apellido) = datos.apellido.as_deref().filter(|a| !a.is_empty()) {
            self.apellido = apellido.to_string();
        }
        if let Some(telefono) = &datos.telefono {
            self.telefono = Some(telefono.clone()).filter(|t| !t.is_empty());
        }
        if let Some(estado) = datos.estado {
            self.estado = estado;
        }
        self.touch();
    }

    pub fn verificar_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    /// Replace the password. The current one is kept if the new one is invalid.
    pub fn cambiar_password(&mut self, nueva: &str) -> DomainResult<()> {
        self.password = Password::new(nueva)?;
        self.touch();
        Ok(())
    }

    pub fn activar(&mut self) {
        self.estado = EstadoUsuario::Activo;
        self.touch();
    }

    pub fn desactivar(&mut self) {
        self.estado = EstadoUsuario::Inactivo;
        self.touch();
    }

    pub fn suspender(&mut self) {
        self.estado = EstadoUsuario::Suspendido;
        self.touch();
    }

    pub fn esta_activo(&self) -> bool {
        self.estado == EstadoUsuario::Activo
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Usuario {
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

/// Usuario creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsuario {
    pub username: String,
    pub email: String,
    /// Plain password, checked by the `Password` value object
    pub password: String,
    #[validate(custom(function = "nombre_valido"))]
    pub nombre: String,
    #[validate(custom(function = "apellido_valido"))]
    pub apellido: String,
    pub telefono: Option<String>,
    pub rol: RolUsuario,
}

/// Usuario update data transfer object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsuario {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub estado: Option<EstadoUsuario>,
}

/// Usuario view (safe to return to clients, never carries the password)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    pub rol: RolUsuario,
    pub estado: EstadoUsuario,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Usuario> for UsuarioResponse {
    fn from(usuario: &Usuario) -> Self {
        Self {
            id: usuario.id.clone(),
            username: usuario.username.to_string(),
            email: usuario.email.to_string(),
            nombre: usuario.nombre.clone(),
            apellido: usuario.apellido.clone(),
            telefono: usuario.telefono.clone(),
            rol: usuario.rol,
            estado: usuario.estado,
            created_at: usuario.created_at,
            updated_at: usuario.updated_at,
        }
    }
}

impl From<Usuario> for UsuarioResponse {
    fn from(usuario: Usuario) -> Self {
        UsuarioResponse::from(&usuario)
    }
}
