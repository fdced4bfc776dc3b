//! Cliente service - registration, categories and derived views.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use common::{validate_dto, AppResult, OperationResult};
use domain::{
    CategoriaCliente, Cliente, CreateCliente, Entity, EstadoCliente, TipoDocumento,
    UpdateCliente,
};

use super::{id_requerido, requerido, resultado_actualizacion};
use crate::repository::{Cambio, ClienteRepository};

/// Aggregate figures over all clientes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadisticasClientes {
    pub total: usize,
    pub por_estado: BTreeMap<EstadoCliente, usize>,
    pub por_categoria: BTreeMap<CategoriaCliente, usize>,
    /// Mean age rounded to whole years, 0 when empty
    pub edad_promedio: u32,
    pub mayores_de_edad: usize,
    pub vip: usize,
}

/// Cliente service trait for dependency injection.
#[async_trait]
pub trait ClienteService: Send + Sync {
    /// Validate and create a new cliente
    async fn create(&self, datos: CreateCliente) -> AppResult<Cliente>;

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Cliente>>;

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Cliente>>;

    async fn get_by_documento(
        &self,
        tipo: TipoDocumento,
        numero: &str,
    ) -> AppResult<Option<Cliente>>;

    async fn get_by_usuario_id(&self, usuario_id: &str) -> AppResult<Option<Cliente>>;

    async fn list(&self) -> AppResult<Vec<Cliente>>;

    async fn list_por_estado(&self, estado: EstadoCliente) -> AppResult<Vec<Cliente>>;

    async fn list_por_categoria(&self, categoria: CategoriaCliente) -> AppResult<Vec<Cliente>>;

    async fn update(&self, id: &str, datos: UpdateCliente) -> AppResult<OperationResult<Cliente>>;

    async fn delete(&self, id: &str) -> AppResult<bool>;

    async fn cambiar_estado(
        &self,
        id: &str,
        estado: EstadoCliente,
    ) -> AppResult<OperationResult<Cliente>>;

    /// Move one step up the category ladder
    async fn ascender_categoria(&self, id: &str) -> AppResult<OperationResult<Cliente>>;

    async fn email_disponible(&self, email: &str) -> AppResult<bool>;

    async fn documento_disponible(&self, tipo: TipoDocumento, numero: &str) -> AppResult<bool>;

    async fn list_mayores_de_edad(&self) -> AppResult<Vec<Cliente>>;

    /// ORO and PLATINO clientes
    async fn list_vip(&self) -> AppResult<Vec<Cliente>>;

    async fn contar_por_categoria(&self) -> AppResult<BTreeMap<CategoriaCliente, usize>>;

    async fn estadisticas(&self) -> AppResult<EstadisticasClientes>;
}

/// Concrete implementation of ClienteService using repository.
pub struct ClienteManager {
    repo: Arc<dyn ClienteRepository>,
}

impl ClienteManager {
    /// Create new cliente service instance with repository
    pub fn new(repo: Arc<dyn ClienteRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ClienteService for ClienteManager {
    async fn create(&self, datos: CreateCliente) -> AppResult<Cliente> {
        validate_dto(&datos)?;

        let cliente = self.repo.create(datos).await?;
        info!(
            id = %cliente.id(),
            "Cliente creado: {} ({}: {})",
            cliente.nombre_completo(),
            cliente.tipo_documento(),
            cliente.numero_documento()
        );
        Ok(cliente)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Cliente>> {
        requerido(id, "ID de cliente requerido")?;

        let cliente = self.repo.find_by_id(id).await?;
        match &cliente {
            Some(c) => info!("Cliente encontrado: {} ({} años)", c.nombre_completo(), c.edad()),
            None => info!("Cliente con ID '{}' no encontrado", id),
        }
        Ok(cliente)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Cliente>> {
        requerido(email, "Email requerido")?;
        self.repo.find_by_email(email).await
    }

    async fn get_by_documento(
        &self,
        tipo: TipoDocumento,
        numero: &str,
    ) -> AppResult<Option<Cliente>> {
        requerido(numero, "Número de documento requerido")?;
        self.repo.find_by_documento(tipo, numero).await
    }

    async fn get_by_usuario_id(&self, usuario_id: &str) -> AppResult<Option<Cliente>> {
        requerido(usuario_id, "ID de usuario requerido")?;
        self.repo.find_by_usuario_id(usuario_id).await
    }

    async fn list(&self) -> AppResult<Vec<Cliente>> {
        let clientes = self.repo.list().await?;
        info!("Total clientes encontrados: {}", clientes.len());
        Ok(clientes)
    }

    async fn list_por_estado(&self, estado: EstadoCliente) -> AppResult<Vec<Cliente>> {
        let clientes = self.repo.find_by_estado(estado).await?;
        info!("Clientes con estado {}: {}", estado, clientes.len());
        Ok(clientes)
    }

    async fn list_por_categoria(&self, categoria: CategoriaCliente) -> AppResult<Vec<Cliente>> {
        let clientes = self.repo.find_by_categoria(categoria).await?;
        info!("Clientes categoría {}: {}", categoria, clientes.len());
        Ok(clientes)
    }

    async fn update(&self, id: &str, datos: UpdateCliente) -> AppResult<OperationResult<Cliente>> {
        if id.trim().is_empty() {
            return Ok(id_requerido("cliente"));
        }

        let resultado = resultado_actualizacion("cliente", self.repo.update(id, datos).await);
        if let Some(cliente) = resultado.data() {
            info!("Cliente actualizado: {}", cliente.nombre_completo());
        }
        Ok(resultado)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        requerido(id, "ID de cliente requerido")?;

        let Some(cliente) = self.repo.find_by_id(id).await? else {
            info!("Cliente con ID '{}' no encontrado para eliminar", id);
            return Ok(false);
        };

        let eliminado = self.repo.delete(id).await?;
        if eliminado {
            info!("Cliente eliminado: {}", cliente.nombre_completo());
        }
        Ok(eliminado)
    }

    async fn cambiar_estado(
        &self,
        id: &str,
        estado: EstadoCliente,
    ) -> AppResult<OperationResult<Cliente>> {
        self.update(
            id,
            UpdateCliente {
                estado: Some(estado),
                ..Default::default()
            },
        )
        .await
    }

    async fn ascender_categoria(&self, id: &str) -> AppResult<OperationResult<Cliente>> {
        if id.trim().is_empty() {
            return Ok(id_requerido("cliente"));
        }

        let cambio: Cambio<Cliente> = Box::new(|cliente: &mut Cliente| {
            if cliente.ascender_categoria() {
                return Ok(());
            }
            Err(OperationResult::failure(
                "Cliente ya está en la categoría más alta",
                "No se puede ascender más",
            ))
        });

        let resultado = resultado_actualizacion("cliente", self.repo.modify(id, cambio).await);
        if let Some(cliente) = resultado.data() {
            info!(
                "Cliente ascendido a {}: {}",
                cliente.categoria(),
                cliente.nombre_completo()
            );
        }
        Ok(resultado)
    }

    async fn email_disponible(&self, email: &str) -> AppResult<bool> {
        Ok(!self.repo.exists_email(email).await?)
    }

    async fn documento_disponible(&self, tipo: TipoDocumento, numero: &str) -> AppResult<bool> {
        Ok(!self.repo.exists_documento(tipo, numero).await?)
    }

    async fn list_mayores_de_edad(&self) -> AppResult<Vec<Cliente>> {
        let clientes = self.repo.list().await?;
        Ok(clientes.into_iter().filter(Cliente::es_mayor_de_edad).collect())
    }

    async fn list_vip(&self) -> AppResult<Vec<Cliente>> {
        let clientes = self.repo.list().await?;
        Ok(clientes
            .into_iter()
            .filter(|c| c.categoria().es_vip())
            .collect())
    }

    async fn contar_por_categoria(&self) -> AppResult<BTreeMap<CategoriaCliente, usize>> {
        self.repo.count_by_categoria().await
    }

    async fn estadisticas(&self) -> AppResult<EstadisticasClientes> {
        let clientes = self.repo.list().await?;

        let mut stats = EstadisticasClientes {
            total: clientes.len(),
            por_estado: BTreeMap::new(),
            por_categoria: BTreeMap::new(),
            edad_promedio: 0,
            mayores_de_edad: 0,
            vip: 0,
        };

        let mut suma_edades: u64 = 0;
        for cliente in &clientes {
            *stats.por_estado.entry(cliente.estado()).or_insert(0) += 1;
            *stats.por_categoria.entry(cliente.categoria()).or_insert(0) += 1;

            let edad = cliente.edad();
            suma_edades += u64::from(edad);
            if edad >= domain::EDAD_MINIMA_CLIENTE {
                stats.mayores_de_edad += 1;
            }
            if cliente.categoria().es_vip() {
                stats.vip += 1;
            }
        }

        if !clientes.is_empty() {
            stats.edad_promedio = (suma_edades as f64 / clientes.len() as f64).round() as u32;
        }

        Ok(stats)
    }
}
