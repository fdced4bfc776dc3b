//! Cliente repository backed by the in-memory store.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use common::{AppError, AppResult, OperationResult};
use domain::cliente::hoy;
use domain::{
    calcular_edad, generate_id, CategoriaCliente, Cliente, CreateCliente, Email, Entity,
    EstadoCliente, NumeroDocumento, TipoDocumento, UpdateCliente, EDAD_MINIMA_CLIENTE,
};

use super::store::{simulate_latency, Cambio, MemoryStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cliente repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ClienteRepository: Send + Sync {
    /// Create a new cliente; fails on duplicate email or document, or if under age
    async fn create(&self, datos: CreateCliente) -> AppResult<Cliente>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Cliente>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Cliente>>;

    /// Lookup by document type and number (compared digits-only)
    async fn find_by_documento(
        &self,
        tipo: TipoDocumento,
        numero: &str,
    ) -> AppResult<Option<Cliente>>;

    async fn list(&self) -> AppResult<Vec<Cliente>>;

    async fn find_by_estado(&self, estado: EstadoCliente) -> AppResult<Vec<Cliente>>;

    async fn find_by_categoria(&self, categoria: CategoriaCliente) -> AppResult<Vec<Cliente>>;

    async fn find_by_usuario_id(&self, usuario_id: &str) -> AppResult<Option<Cliente>>;

    /// Apply a partial update; invalid fields leave the cliente untouched
    async fn update(&self, id: &str, datos: UpdateCliente) -> AppResult<OperationResult<Cliente>>;

    /// Persist an already mutated cliente
    async fn save(&self, cliente: Cliente) -> AppResult<OperationResult<Cliente>>;

    /// Apply a guarded change atomically; a failure from `cambio` is returned as is
    async fn modify(&self, id: &str, cambio: Cambio<Cliente>) -> AppResult<OperationResult<Cliente>>;

    async fn delete(&self, id: &str) -> AppResult<bool>;

    async fn exists_email(&self, email: &str) -> AppResult<bool>;

    async fn exists_documento(&self, tipo: TipoDocumento, numero: &str) -> AppResult<bool>;

    /// Number of clientes per category, every category present
    async fn count_by_categoria(&self) -> AppResult<BTreeMap<CategoriaCliente, usize>>;
}

/// Concrete implementation of ClienteRepository
pub struct ClienteStore {
    store: MemoryStore<Cliente>,
    latency: Duration,
}

impl ClienteStore {
    /// Create new repository instance over a shared store
    pub fn new(store: MemoryStore<Cliente>, latency: Duration) -> Self {
        Self { store, latency }
    }
}

fn no_encontrado(id: &str) -> OperationResult<Cliente> {
    OperationResult::failure(
        format!("Cliente con ID '{}' no encontrado", id),
        "Cliente no existe",
    )
}

#[async_trait]
impl ClienteRepository for ClienteStore {
    async fn create(&self, datos: CreateCliente) -> AppResult<Cliente> {
        simulate_latency(self.latency).await;

        let mut clientes = self.store.lock().await;

        let email = Email::normalize(&datos.email);
        if clientes.values().any(|c| c.email().as_str() == email) {
            return Err(AppError::conflict(format!("Email '{}'", email)));
        }
        if clientes
            .values()
            .any(|c| c.tiene_documento(datos.tipo_documento, &datos.numero_documento))
        {
            return Err(AppError::conflict(format!(
                "Documento {} '{}'",
                datos.tipo_documento,
                NumeroDocumento::limpiar(&datos.numero_documento)
            )));
        }
        if calcular_edad(datos.fecha_nacimiento, hoy()) < EDAD_MINIMA_CLIENTE {
            return Err(AppError::validation(format!(
                "El cliente debe ser mayor de edad ({} años)",
                EDAD_MINIMA_CLIENTE
            )));
        }

        let cliente = Cliente::new(
            generate_id(),
            datos.nombre.trim().to_string(),
            datos.apellido.trim().to_string(),
            Email::new(&datos.email)?,
            datos.telefono.trim().to_string(),
            datos.tipo_documento,
            NumeroDocumento::new(&datos.numero_documento, datos.tipo_documento)?,
            datos.fecha_nacimiento,
            datos.direccion.to_direccion()?,
            datos.usuario_id,
        );

        clientes.insert(cliente.id().to_string(), cliente.clone());
        debug!(id = %cliente.id(), email = %cliente.email(), "Cliente stored");

        Ok(cliente)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Cliente>> {
        simulate_latency(self.latency).await;
        Ok(self.store.get(id).await)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Cliente>> {
        simulate_latency(self.latency).await;
        Ok(self.store.find(|c| c.email().matches(email)).await)
    }

    async fn find_by_documento(
        &self,
        tipo: TipoDocumento,
        numero: &str,
    ) -> AppResult<Option<Cliente>> {
        simulate_latency(self.latency).await;
        Ok(self.store.find(|c| c.tiene_documento(tipo, numero)).await)
    }

    async fn list(&self) -> AppResult<Vec<Cliente>> {
        simulate_latency(self.latency).await;
        Ok(self.store.all().await)
    }

    async fn find_by_estado(&self, estado: EstadoCliente) -> AppResult<Vec<Cliente>> {
        simulate_latency(self.latency).await;
        Ok(self.store.filter(|c| c.estado() == estado).await)
    }

    async fn find_by_categoria(&self, categoria: CategoriaCliente) -> AppResult<Vec<Cliente>> {
        simulate_latency(self.latency).await;
        Ok(self.store.filter(|c| c.categoria() == categoria).await)
    }

    async fn find_by_usuario_id(&self, usuario_id: &str) -> AppResult<Option<Cliente>> {
        simulate_latency(self.latency).await;
        Ok(self
            .store
            .find(|c| c.usuario_id() == Some(usuario_id))
            .await)
    }

    async fn update(&self, id: &str, datos: UpdateCliente) -> AppResult<OperationResult<Cliente>> {
        simulate_latency(self.latency).await;

        let mut clientes = self.store.lock().await;
        let Some(cliente) = clientes.get_mut(id) else {
            return Ok(no_encontrado(id));
        };

        cliente.actualizar_informacion(&datos)?;
        debug!(id = %id, "Cliente updated");

        Ok(OperationResult::success(
            cliente.clone(),
            "Cliente actualizado exitosamente",
        ))
    }

    async fn save(&self, cliente: Cliente) -> AppResult<OperationResult<Cliente>> {
        simulate_latency(self.latency).await;

        let id = cliente.id().to_string();
        if !self.store.replace(cliente.clone()).await {
            return Ok(no_encontrado(&id));
        }
        debug!(id = %id, "Cliente saved");

        Ok(OperationResult::success(cliente, "Cliente guardado exitosamente"))
    }

    async fn modify(&self, id: &str, cambio: Cambio<Cliente>) -> AppResult<OperationResult<Cliente>> {
        simulate_latency(self.latency).await;

        let resultado = match self.store.modify(id, cambio).await {
            None => no_encontrado(id),
            Some(Ok(cliente)) => {
                debug!(id = %id, "Cliente modified");
                OperationResult::success(cliente, "Cliente actualizado exitosamente")
            }
            Some(Err(fallo)) => fallo,
        };
        Ok(resultado)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        simulate_latency(self.latency).await;
        let removed = self.store.remove(id).await;
        debug!(id = %id, removed, "Cliente delete");
        Ok(removed)
    }

    async fn exists_email(&self, email: &str) -> AppResult<bool> {
        simulate_latency(self.latency).await;
        Ok(self.store.any(|c| c.email().matches(email)).await)
    }

    async fn exists_documento(&self, tipo: TipoDocumento, numero: &str) -> AppResult<bool> {
        simulate_latency(self.latency).await;
        Ok(self.store.any(|c| c.tiene_documento(tipo, numero)).await)
    }

    async fn count_by_categoria(&self) -> AppResult<BTreeMap<CategoriaCliente, usize>> {
        simulate_latency(self.latency).await;

        let mut conteo: BTreeMap<CategoriaCliente, usize> =
            CategoriaCliente::ALL.iter().map(|c| (*c, 0)).collect();
        for cliente in self.store.all().await {
            *conteo.entry(cliente.categoria()).or_default() += 1;
        }
        Ok(conteo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use domain::DireccionInput;

    fn repo() -> ClienteStore {
        ClienteStore::new(MemoryStore::new(), Duration::ZERO)
    }

    fn dto(email: &str, numero: &str) -> CreateCliente {
        CreateCliente {
            nombre: "Ana".to_string(),
            apellido: "Rodríguez".to_string(),
            email: email.to_string(),
            telefono: "+57-311-2468135".to_string(),
            tipo_documento: TipoDocumento::Cedula,
            numero_documento: numero.to_string(),
            fecha_nacimiento: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
            direccion: DireccionInput {
                calle: "Calle 123 #45-67".to_string(),
                ciudad: "Bogotá".to_string(),
                departamento: "Cundinamarca".to_string(),
                codigo_postal: Some("110111".to_string()),
            },
            usuario_id: Some("cli-001".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup_by_documento() {
        let repo = repo();
        let cliente = repo.create(dto("ana@email.com", "12.345.678")).await.unwrap();

        assert_eq!(cliente.numero_documento().as_str(), "12345678");
        assert_eq!(cliente.categoria(), CategoriaCliente::Bronce);

        let found = repo
            .find_by_documento(TipoDocumento::Cedula, "12345678")
            .await
            .unwrap();
        assert_eq!(found.map(|c| c.id().to_string()), Some(cliente.id().to_string()));
        assert!(!repo
            .exists_documento(TipoDocumento::Passport, "12345678")
            .await
            .unwrap());
        assert!(repo.find_by_usuario_id("cli-001").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_documento_is_conflict() {
        let repo = repo();
        repo.create(dto("ana@email.com", "12345678")).await.unwrap();

        let err = repo
            .create(dto("otra@email.com", "12-345-678"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Documento CEDULA '12345678' ya existe");
    }

    #[tokio::test]
    async fn test_underage_is_rejected_without_insert() {
        let repo = repo();
        let mut menor = dto("menor@email.com", "99887766");
        let hoy = hoy();
        menor.fecha_nacimiento = NaiveDate::from_ymd_opt(hoy.year() - 10, 1, 1).unwrap();

        let err = repo.create(menor).await.unwrap_err();
        assert_eq!(err.user_message(), "El cliente debe ser mayor de edad (18 años)");
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_with_invalid_direccion_leaves_cliente_untouched() {
        let repo = repo();
        let cliente = repo.create(dto("ana@email.com", "12345678")).await.unwrap();

        let result = repo
            .update(
                cliente.id(),
                UpdateCliente {
                    nombre: Some("Otra".to_string()),
                    direccion: Some(DireccionInput {
                        calle: " ".to_string(),
                        ciudad: "Cali".to_string(),
                        departamento: "Valle".to_string(),
                        codigo_postal: None,
                    }),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        let stored = repo.find_by_id(cliente.id()).await.unwrap().unwrap();
        assert_eq!(stored.nombre(), "Ana");
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = repo();
        repo.create(dto("ana@email.com", "12345678")).await.unwrap();

        assert!(!repo.delete("no-existe").await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_modify_failure_keeps_stored_cliente() {
        let repo = repo();
        let cliente = repo.create(dto("ana@email.com", "12345678")).await.unwrap();

        let result = repo
            .modify(
                cliente.id(),
                Box::new(|c| {
                    c.bloquear();
                    Err(OperationResult::failure("Bloqueo rechazado", "Sin cambios"))
                }),
            )
            .await
            .unwrap();
        assert_eq!(result.error(), Some("Bloqueo rechazado"));

        let stored = repo.find_by_id(cliente.id()).await.unwrap().unwrap();
        assert_eq!(stored.estado(), EstadoCliente::Activo);

        let missing = repo.modify("no-existe", Box::new(|_| Ok(()))).await.unwrap();
        assert_eq!(missing.message(), Some("Cliente no existe"));
    }

    #[tokio::test]
    async fn test_count_by_categoria_includes_empty_categories() {
        let repo = repo();
        let mut cliente = repo.create(dto("ana@email.com", "12345678")).await.unwrap();
        cliente.ascender_categoria();
        repo.save(cliente).await.unwrap();

        let conteo = repo.count_by_categoria().await.unwrap();
        assert_eq!(conteo.len(), 4);
        assert_eq!(conteo[&CategoriaCliente::Plata], 1);
        assert_eq!(conteo[&CategoriaCliente::Bronce], 0);
    }
}
