//! Directory Service Library
//!
//! Usuario, Cliente and Emprendedor management over in-memory stores.
//! Stores are built by the composition root and injected into the
//! repositories; services sit on top of the repository traits.

pub mod config;
pub mod demo;
pub mod repository;
pub mod service;

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use common::AppResult;

use crate::config::DirectoryConfig;
use crate::repository::{seed, ClienteStore, EmprendedorStore, MemoryStore, UsuarioStore};
use crate::service::{
    ClienteManager, ClienteService, EmprendedorManager, EmprendedorService, EstadisticasClientes,
    EstadisticasEmprendedores, EstadisticasUsuarios, UsuarioManager, UsuarioService,
};

/// Statistics of the three services, as printed by `stats`.
#[derive(Debug, Clone, Serialize)]
pub struct EstadisticasDirectorio {
    pub usuarios: EstadisticasUsuarios,
    pub clientes: EstadisticasClientes,
    pub emprendedores: EstadisticasEmprendedores,
}

/// The three services wired over their stores.
#[derive(Clone)]
pub struct Directory {
    pub usuarios: Arc<dyn UsuarioService>,
    pub clientes: Arc<dyn ClienteService>,
    pub emprendedores: Arc<dyn EmprendedorService>,
}

impl Directory {
    /// Build stores, repositories and services from configuration.
    pub fn from_config(config: &DirectoryConfig) -> AppResult<Self> {
        let (usuarios, clientes, emprendedores) = if config.seed_data {
            (
                MemoryStore::with_entries(seed::usuarios()?),
                MemoryStore::with_entries(seed::clientes()?),
                MemoryStore::with_entries(seed::emprendedores()?),
            )
        } else {
            (MemoryStore::new(), MemoryStore::new(), MemoryStore::new())
        };

        info!(
            service = %config.service.service_name,
            "Directory initialized (seed data: {})",
            config.seed_data
        );

        let latency = config.latency;
        let usuario_repo = Arc::new(UsuarioStore::new(usuarios, latency.usuario()));
        let cliente_repo = Arc::new(ClienteStore::new(clientes, latency.cliente()));
        let emprendedor_repo = Arc::new(EmprendedorStore::new(emprendedores, latency.emprendedor()));

        Ok(Self {
            usuarios: Arc::new(UsuarioManager::new(usuario_repo)),
            clientes: Arc::new(ClienteManager::new(cliente_repo)),
            emprendedores: Arc::new(EmprendedorManager::new(emprendedor_repo)),
        })
    }

    /// Gather the three statistics objects concurrently.
    pub async fn estadisticas(&self) -> AppResult<EstadisticasDirectorio> {
        let (usuarios, clientes, emprendedores) = futures::try_join!(
            self.usuarios.estadisticas(),
            self.clientes.estadisticas(),
            self.emprendedores.estadisticas(),
        )?;

        Ok(EstadisticasDirectorio {
            usuarios,
            clientes,
            emprendedores,
        })
    }
}
