//! Usuario repository backed by the in-memory store.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use common::{AppError, AppResult, OperationResult};
use domain::{
    generate_id, CreateUsuario, Email, Entity, Password, UpdateUsuario, Username, Usuario,
};

use super::store::{simulate_latency, Cambio, MemoryStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Usuario repository trait for dependency injection.
///
/// Lookups that find nothing return `None`/`false`, never an error.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    /// Create a new usuario; fails on duplicate username or email
    async fn create(&self, datos: CreateUsuario) -> AppResult<Usuario>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Usuario>>;

    /// Exact (case-sensitive) username lookup
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Usuario>>;

    /// Email lookup, normalized before comparing
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Usuario>>;

    async fn list(&self) -> AppResult<Vec<Usuario>>;

    /// Apply a partial update
    async fn update(&self, id: &str, datos: UpdateUsuario) -> AppResult<OperationResult<Usuario>>;

    /// Persist an already mutated usuario
    async fn save(&self, usuario: Usuario) -> AppResult<OperationResult<Usuario>>;

    /// Apply a guarded change atomically; a failure from `cambio` is returned as is
    async fn modify(&self, id: &str, cambio: Cambio<Usuario>) -> AppResult<OperationResult<Usuario>>;

    /// Remove by ID, returning whether it existed
    async fn delete(&self, id: &str) -> AppResult<bool>;

    async fn exists_username(&self, username: &str) -> AppResult<bool>;

    async fn exists_email(&self, email: &str) -> AppResult<bool>;
}

/// Concrete implementation of UsuarioRepository
pub struct UsuarioStore {
    store: MemoryStore<Usuario>,
    latency: Duration,
}

impl UsuarioStore {
    /// Create new repository instance over a shared store
    pub fn new(store: MemoryStore<Usuario>, latency: Duration) -> Self {
        Self { store, latency }
    }
}

fn no_encontrado(id: &str) -> OperationResult<Usuario> {
    OperationResult::failure(
        format!("Usuario con ID '{}' no encontrado", id),
        "Usuario no existe",
    )
}

#[async_trait]
impl UsuarioRepository for UsuarioStore {
    async fn create(&self, datos: CreateUsuario) -> AppResult<Usuario> {
        simulate_latency(self.latency).await;

        // Uniqueness check and insert share one critical section
        let mut usuarios = self.store.lock().await;

        let username = datos.username.trim();
        if usuarios.values().any(|u| u.username().as_str() == username) {
            return Err(AppError::conflict(format!("Username '{}'", username)));
        }
        let email = Email::normalize(&datos.email);
        if usuarios.values().any(|u| u.email().as_str() == email) {
            return Err(AppError::conflict(format!("Email '{}'", email)));
        }

        let usuario = Usuario::new(
            generate_id(),
            Username::new(&datos.username)?,
            Email::new(&datos.email)?,
            Password::new(&datos.password)?,
            datos.nombre.trim().to_string(),
            datos.apellido.trim().to_string(),
            datos.rol,
            datos.telefono.filter(|t| !t.trim().is_empty()),
        );

        usuarios.insert(usuario.id().to_string(), usuario.clone());
        debug!(id = %usuario.id(), username = %usuario.username(), "Usuario stored");

        Ok(usuario)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Usuario>> {
        simulate_latency(self.latency).await;
        Ok(self.store.get(id).await)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Usuario>> {
        simulate_latency(self.latency).await;
        Ok(self
            .store
            .find(|u| u.username().as_str() == username)
            .await)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Usuario>> {
        simulate_latency(self.latency).await;
        Ok(self.store.find(|u| u.email().matches(email)).await)
    }

    async fn list(&self) -> AppResult<Vec<Usuario>> {
        simulate_latency(self.latency).await;
        Ok(self.store.all().await)
    }

    async fn update(&self, id: &str, datos: UpdateUsuario) -> AppResult<OperationResult<Usuario>> {
        simulate_latency(self.latency).await;

        let mut usuarios = self.store.lock().await;
        let Some(usuario) = usuarios.get_mut(id) else {
            return Ok(no_encontrado(id));
        };

        usuario.actualizar_informacion(&datos);
        debug!(id = %id, "Usuario updated");

        Ok(OperationResult::success(
            usuario.clone(),
            "Usuario actualizado exitosamente",
        ))
    }

    async fn save(&self, usuario: Usuario) -> AppResult<OperationResult<Usuario>> {
        simulate_latency(self.latency).await;

        let id = usuario.id().to_string();
        if !self.store.replace(usuario.clone()).await {
            return Ok(no_encontrado(&id));
        }
        debug!(id = %id, "Usuario saved");

        Ok(OperationResult::success(usuario, "Usuario guardado exitosamente"))
    }

    async fn modify(&self, id: &str, cambio: Cambio<Usuario>) -> AppResult<OperationResult<Usuario>> {
        simulate_latency(self.latency).await;

        let resultado = match self.store.modify(id, cambio).await {
            None => no_encontrado(id),
            Some(Ok(usuario)) => {
                debug!(id = %id, "Usuario modified");
                OperationResult::success(usuario, "Usuario actualizado exitosamente")
            }
            Some(Err(fallo)) => fallo,
        };
        Ok(resultado)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        simulate_latency(self.latency).await;
        let removed = self.store.remove(id).await;
        debug!(id = %id, removed, "Usuario delete");
        Ok(removed)
    }

    async fn exists_username(&self, username: &str) -> AppResult<bool> {
        simulate_latency(self.latency).await;
        Ok(self.store.any(|u| u.username().as_str() == username).await)
    }

    async fn exists_email(&self, email: &str) -> AppResult<bool> {
        simulate_latency(self.latency).await;
        Ok(self.store.any(|u| u.email().matches(email)).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::RolUsuario;

    fn repo() -> UsuarioStore {
        UsuarioStore::new(MemoryStore::new(), Duration::ZERO)
    }

    fn dto(username: &str, email: &str) -> CreateUsuario {
        CreateUsuario {
            username: username.to_string(),
            email: email.to_string(),
            password: "Cliente123$".to_string(),
            nombre: "Juan".to_string(),
            apellido: "Pérez".to_string(),
            telefono: Some("+57-320-5555555".to_string()),
            rol: RolUsuario::Cliente,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_normalizes_email() {
        let repo = repo();
        let usuario = repo.create(dto("juan_cliente", "Juan@Email.com")).await.unwrap();

        assert!(!usuario.id().is_empty());
        assert_eq!(usuario.email().as_str(), "juan@email.com");
        assert!(repo.find_by_email(" JUAN@email.com ").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_padded_email() {
        let repo = repo();

        assert!(repo.create(dto("juan_cliente", " juan@email.com ")).await.is_err());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let repo = repo();
        repo.create(dto("juan_cliente", "juan@email.com")).await.unwrap();

        let err = repo
            .create(dto("juan_cliente", "otro@email.com"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Username 'juan_cliente' ya existe");
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_username_is_case_sensitive() {
        let repo = repo();
        repo.create(dto("juan_cliente", "juan@email.com")).await.unwrap();

        assert!(repo.create(dto("Juan_Cliente", "otro@email.com")).await.is_ok());
        assert!(!repo.exists_username("JUAN_CLIENTE").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = repo();
        repo.create(dto("juan_cliente", "juan@email.com")).await.unwrap();

        let err = repo.create(dto("otro", "JUAN@email.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_invalid_value_objects_are_rejected() {
        let repo = repo();
        assert!(repo.create(dto("ju", "juan@email.com")).await.is_err());
        assert!(repo.create(dto("juan", "no-es-email")).await.is_err());

        let mut weak = dto("juan", "juan@email.com");
        weak.password = "password".to_string();
        assert!(matches!(repo.create(weak).await, Err(AppError::Validation(_))));

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_returns_failure() {
        let result = repo()
            .update("nope", UpdateUsuario::default())
            .await
            .unwrap();

        assert!(!result.is_success());
        assert_eq!(result.error(), Some("Usuario con ID 'nope' no encontrado"));
        assert_eq!(result.message(), Some("Usuario no existe"));
    }

    #[tokio::test]
    async fn test_save_after_delete_fails() {
        let repo = repo();
        let mut usuario = repo.create(dto("juan_cliente", "juan@email.com")).await.unwrap();
        assert!(repo.delete(usuario.id()).await.unwrap());

        usuario.suspender();
        assert!(!repo.save(usuario).await.unwrap().is_success());
        assert!(!repo.delete("juan_cliente").await.unwrap());
    }
}
