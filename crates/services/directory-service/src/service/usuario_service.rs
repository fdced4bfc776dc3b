//! Usuario service - account lifecycle and authentication.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use common::{validate_dto, AppResult, OperationResult};
use domain::{CreateUsuario, Entity, EstadoUsuario, RolUsuario, UpdateUsuario, Usuario};

use super::{id_requerido, requerido, resultado_actualizacion};
use crate::repository::{Cambio, UsuarioRepository};

/// Aggregate figures over all usuarios
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadisticasUsuarios {
    pub total: usize,
    pub por_rol: BTreeMap<RolUsuario, usize>,
    pub activos: usize,
    /// Every usuario not ACTIVO, suspended ones included
    pub inactivos: usize,
}

/// Usuario service trait for dependency injection.
#[async_trait]
pub trait UsuarioService: Send + Sync {
    /// Validate and create a new usuario
    async fn create(&self, datos: CreateUsuario) -> AppResult<Usuario>;

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Usuario>>;

    async fn get_by_username(&self, username: &str) -> AppResult<Option<Usuario>>;

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Usuario>>;

    async fn list(&self) -> AppResult<Vec<Usuario>>;

    async fn list_por_rol(&self, rol: RolUsuario) -> AppResult<Vec<Usuario>>;

    async fn update(&self, id: &str, datos: UpdateUsuario) -> AppResult<OperationResult<Usuario>>;

    /// Delete an existing usuario; `false` when there was nothing to delete
    async fn delete(&self, id: &str) -> AppResult<bool>;

    /// The usuario only if it exists, is active and the password matches
    async fn autenticar(&self, username: &str, password: &str) -> AppResult<Option<Usuario>>;

    async fn cambiar_estado(
        &self,
        id: &str,
        estado: EstadoUsuario,
    ) -> AppResult<OperationResult<Usuario>>;

    async fn cambiar_password(&self, id: &str, nueva: &str) -> AppResult<OperationResult<Usuario>>;

    async fn username_disponible(&self, username: &str) -> AppResult<bool>;

    async fn email_disponible(&self, email: &str) -> AppResult<bool>;

    async fn estadisticas(&self) -> AppResult<EstadisticasUsuarios>;
}

/// Concrete implementation of UsuarioService using repository.
pub struct UsuarioManager {
    repo: Arc<dyn UsuarioRepository>,
}

impl UsuarioManager {
    /// Create new usuario service instance with repository
    pub fn new(repo: Arc<dyn UsuarioRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UsuarioService for UsuarioManager {
    async fn create(&self, datos: CreateUsuario) -> AppResult<Usuario> {
        validate_dto(&datos)?;

        let usuario = self.repo.create(datos).await?;
        info!(
            id = %usuario.id(),
            "Usuario creado: {} ({})",
            usuario.nombre_completo(),
            usuario.rol()
        );
        Ok(usuario)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Usuario>> {
        requerido(id, "ID de usuario requerido")?;

        let usuario = self.repo.find_by_id(id).await?;
        match &usuario {
            Some(u) => info!("Usuario encontrado: {}", u.nombre_completo()),
            None => info!("Usuario con ID '{}' no encontrado", id),
        }
        Ok(usuario)
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Option<Usuario>> {
        requerido(username, "Username requerido")?;
        self.repo.find_by_username(username).await
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Usuario>> {
        requerido(email, "Email requerido")?;
        self.repo.find_by_email(email).await
    }

    async fn list(&self) -> AppResult<Vec<Usuario>> {
        let usuarios = self.repo.list().await?;
        info!("Total usuarios encontrados: {}", usuarios.len());
        Ok(usuarios)
    }

    async fn list_por_rol(&self, rol: RolUsuario) -> AppResult<Vec<Usuario>> {
        let usuarios = self.repo.list().await?;
        Ok(usuarios.into_iter().filter(|u| u.rol() == rol).collect())
    }

    async fn update(&self, id: &str, datos: UpdateUsuario) -> AppResult<OperationResult<Usuario>> {
        if id.trim().is_empty() {
            return Ok(id_requerido("usuario"));
        }

        let resultado = resultado_actualizacion("usuario", self.repo.update(id, datos).await);
        if let Some(usuario) = resultado.data() {
            info!("Usuario actualizado: {}", usuario.nombre_completo());
        }
        Ok(resultado)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        requerido(id, "ID de usuario requerido")?;

        let Some(usuario) = self.repo.find_by_id(id).await? else {
            info!("Usuario con ID '{}' no encontrado para eliminar", id);
            return Ok(false);
        };

        let eliminado = self.repo.delete(id).await?;
        if eliminado {
            info!("Usuario eliminado: {}", usuario.nombre_completo());
        }
        Ok(eliminado)
    }

    async fn autenticar(&self, username: &str, password: &str) -> AppResult<Option<Usuario>> {
        let Some(usuario) = self.repo.find_by_username(username).await? else {
            warn!("Usuario '{}' no encontrado", username);
            return Ok(None);
        };

        if !usuario.esta_activo() {
            warn!("Usuario '{}' no está activo", username);
            return Ok(None);
        }

        if !usuario.verificar_password(password) {
            warn!("Contraseña incorrecta para usuario '{}'", username);
            return Ok(None);
        }

        info!("Usuario autenticado: {}", usuario.nombre_completo());
        Ok(Some(usuario))
    }

    async fn cambiar_estado(
        &self,
        id: &str,
        estado: EstadoUsuario,
    ) -> AppResult<OperationResult<Usuario>> {
        self.update(
            id,
            UpdateUsuario {
                estado: Some(estado),
                ..Default::default()
            },
        )
        .await
    }

    async fn cambiar_password(&self, id: &str, nueva: &str) -> AppResult<OperationResult<Usuario>> {
        if id.trim().is_empty() {
            return Ok(id_requerido("usuario"));
        }

        let nueva = nueva.to_string();
        let cambio: Cambio<Usuario> = Box::new(move |usuario: &mut Usuario| {
            usuario
                .cambiar_password(&nueva)
                .map_err(|err| OperationResult::failure(err.to_string(), "Contraseña inválida"))
        });

        let resultado = resultado_actualizacion("usuario", self.repo.modify(id, cambio).await);
        if resultado.is_success() {
            info!(id = %id, "Contraseña actualizada");
        }
        Ok(resultado)
    }

    async fn username_disponible(&self, username: &str) -> AppResult<bool> {
        Ok(!self.repo.exists_username(username).await?)
    }

    async fn email_disponible(&self, email: &str) -> AppResult<bool> {
        Ok(!self.repo.exists_email(email).await?)
    }

    async fn estadisticas(&self) -> AppResult<EstadisticasUsuarios> {
        let usuarios = self.repo.list().await?;

        let mut por_rol = BTreeMap::new();
        let mut activos = 0;
        for usuario in &usuarios {
            *por_rol.entry(usuario.rol()).or_insert(0) += 1;
            if usuario.esta_activo() {
                activos += 1;
            }
        }

        Ok(EstadisticasUsuarios {
            total: usuarios.len(),
            por_rol,
            activos,
            inactivos: usuarios.len() - activos,
        })
    }
}
