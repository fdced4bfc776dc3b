//! Emprendedor service - verification, ratings and social accounts.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use common::{validate_dto, AppResult, OperationResult};
use domain::{
    CreateEmprendedor, Emprendedor, Entity, EstadoEmprendedor, NivelExperiencia,
    PlataformaRedSocial, RedSocialInput, SectorEmprendimiento, UpdateEmprendedor,
    PUNTUACION_MAXIMA, PUNTUACION_MINIMA,
};

use super::{id_requerido, requerido, resultado_actualizacion};
use crate::repository::{redondear, Cambio, EmprendedorRepository};

/// Aggregate figures over all emprendedores
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadisticasEmprendedores {
    pub total: usize,
    pub por_estado: BTreeMap<EstadoEmprendedor, usize>,
    pub por_sector: BTreeMap<SectorEmprendimiento, usize>,
    pub por_experiencia: BTreeMap<NivelExperiencia, usize>,
    /// Two decimals, 0 when empty
    pub puntuacion_promedio: f64,
    pub verificados: usize,
    pub alta_puntuacion: usize,
}

/// Emprendedor service trait for dependency injection.
#[async_trait]
pub trait EmprendedorService: Send + Sync {
    /// Validate and create a new emprendedor
    async fn create(&self, datos: CreateEmprendedor) -> AppResult<Emprendedor>;

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Emprendedor>>;

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Emprendedor>>;

    async fn get_by_usuario_id(&self, usuario_id: &str) -> AppResult<Option<Emprendedor>>;

    async fn list(&self) -> AppResult<Vec<Emprendedor>>;

    async fn list_por_estado(&self, estado: EstadoEmprendedor) -> AppResult<Vec<Emprendedor>>;

    async fn list_por_sector(&self, sector: SectorEmprendimiento) -> AppResult<Vec<Emprendedor>>;

    async fn list_por_experiencia(
        &self,
        experiencia: NivelExperiencia,
    ) -> AppResult<Vec<Emprendedor>>;

    async fn list_verificados(&self) -> AppResult<Vec<Emprendedor>>;

    /// Highest rated first, 10 when no limit is given
    async fn list_mejor_puntuados(&self, limite: Option<usize>) -> AppResult<Vec<Emprendedor>>;

    async fn update(
        &self,
        id: &str,
        datos: UpdateEmprendedor,
    ) -> AppResult<OperationResult<Emprendedor>>;

    async fn delete(&self, id: &str) -> AppResult<bool>;

    /// Mark as verified; fails if missing or already verified
    async fn verificar(&self, id: &str) -> AppResult<OperationResult<Emprendedor>>;

    async fn cambiar_estado(
        &self,
        id: &str,
        estado: EstadoEmprendedor,
    ) -> AppResult<OperationResult<Emprendedor>>;

    /// Set the rating; values outside [0, 5] are rejected
    async fn actualizar_puntuacion(
        &self,
        id: &str,
        puntuacion: f64,
    ) -> AppResult<OperationResult<Emprendedor>>;

    async fn agregar_red_social(
        &self,
        id: &str,
        red: RedSocialInput,
    ) -> AppResult<OperationResult<Emprendedor>>;

    async fn remover_red_social(
        &self,
        id: &str,
        plataforma: PlataformaRedSocial,
    ) -> AppResult<OperationResult<Emprendedor>>;

    async fn email_disponible(&self, email: &str) -> AppResult<bool>;

    /// Rated 4.0 or higher
    async fn list_alta_puntuacion(&self) -> AppResult<Vec<Emprendedor>>;

    /// Case-insensitive substring match on the especialidad
    async fn buscar_por_especialidad(&self, texto: &str) -> AppResult<Vec<Emprendedor>>;

    async fn estadisticas(&self) -> AppResult<EstadisticasEmprendedores>;
}

/// Concrete implementation of EmprendedorService using repository.
pub struct EmprendedorManager {
    repo: Arc<dyn EmprendedorRepository>,
}

impl EmprendedorManager {
    /// Create new emprendedor service instance with repository
    pub fn new(repo: Arc<dyn EmprendedorRepository>) -> Self {
        Self { repo }
    }

    /// Run a guarded change under the repository lock.
    async fn aplicar(&self, id: &str, cambio: Cambio<Emprendedor>) -> OperationResult<Emprendedor> {
        resultado_actualizacion("emprendedor", self.repo.modify(id, cambio).await)
    }
}

#[async_trait]
impl EmprendedorService for EmprendedorManager {
    async fn create(&self, datos: CreateEmprendedor) -> AppResult<Emprendedor> {
        validate_dto(&datos)?;

        let emprendedor = self.repo.create(datos).await?;
        info!(
            id = %emprendedor.id(),
            "Emprendedor creado: {} - {} ({})",
            emprendedor.nombre_completo(),
            emprendedor.especialidad(),
            emprendedor.sector()
        );
        Ok(emprendedor)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Emprendedor>> {
        requerido(id, "ID de emprendedor requerido")?;

        let emprendedor = self.repo.find_by_id(id).await?;
        match &emprendedor {
            Some(e) => info!(
                "Emprendedor encontrado: {} ({})",
                e.nombre_completo(),
                e.especialidad()
            ),
            None => info!("Emprendedor con ID '{}' no encontrado", id),
        }
        Ok(emprendedor)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Emprendedor>> {
        requerido(email, "Email requerido")?;
        self.repo.find_by_email(email).await
    }

    async fn get_by_usuario_id(&self, usuario_id: &str) -> AppResult<Option<Emprendedor>> {
        requerido(usuario_id, "ID de usuario requerido")?;
        self.repo.find_by_usuario_id(usuario_id).await
    }

    async fn list(&self) -> AppResult<Vec<Emprendedor>> {
        let emprendedores = self.repo.list().await?;
        info!("Total emprendedores encontrados: {}", emprendedores.len());
        Ok(emprendedores)
    }

    async fn list_por_estado(&self, estado: EstadoEmprendedor) -> AppResult<Vec<Emprendedor>> {
        let emprendedores = self.repo.find_by_estado(estado).await?;
        info!("Emprendedores con estado {}: {}", estado, emprendedores.len());
        Ok(emprendedores)
    }

    async fn list_por_sector(&self, sector: SectorEmprendimiento) -> AppResult<Vec<Emprendedor>> {
        let emprendedores = self.repo.find_by_sector(sector).await?;
        info!("Emprendedores del sector {}: {}", sector, emprendedores.len());
        Ok(emprendedores)
    }

    async fn list_por_experiencia(
        &self,
        experiencia: NivelExperiencia,
    ) -> AppResult<Vec<Emprendedor>> {
        let emprendedores = self.repo.find_by_experiencia(experiencia).await?;
        info!(
            "Emprendedores con experiencia {}: {}",
            experiencia,
            emprendedores.len()
        );
        Ok(emprendedores)
    }

    async fn list_verificados(&self) -> AppResult<Vec<Emprendedor>> {
        let emprendedores = self.repo.list_verificados().await?;
        info!("Emprendedores verificados: {}", emprendedores.len());
        Ok(emprendedores)
    }

    async fn list_mejor_puntuados(&self, limite: Option<usize>) -> AppResult<Vec<Emprendedor>> {
        self.repo.list_mejor_puntuados(limite).await
    }

    async fn update(
        &self,
        id: &str,
        datos: UpdateEmprendedor,
    ) -> AppResult<OperationResult<Emprendedor>> {
        if id.trim().is_empty() {
            return Ok(id_requerido("emprendedor"));
        }

        let resultado = resultado_actualizacion("emprendedor", self.repo.update(id, datos).await);
        if let Some(emprendedor) = resultado.data() {
            info!("Emprendedor actualizado: {}", emprendedor.nombre_completo());
        }
        Ok(resultado)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        requerido(id, "ID de emprendedor requerido")?;

        let Some(emprendedor) = self.repo.find_by_id(id).await? else {
            info!("Emprendedor con ID '{}' no encontrado para eliminar", id);
            return Ok(false);
        };

        let eliminado = self.repo.delete(id).await?;
        if eliminado {
            info!("Emprendedor eliminado: {}", emprendedor.nombre_completo());
        }
        Ok(eliminado)
    }

    async fn verificar(&self, id: &str) -> AppResult<OperationResult<Emprendedor>> {
        let resultado = self
            .aplicar(
                id,
                Box::new(|emprendedor: &mut Emprendedor| {
                    if emprendedor.esta_verificado() {
                        return Err(OperationResult::failure(
                            "Emprendedor ya está verificado",
                            "Estado actual es verificado",
                        ));
                    }
                    emprendedor.verificar();
                    Ok(())
                }),
            )
            .await;

        if let Some(e) = resultado.data() {
            info!("Emprendedor verificado: {}", e.nombre_completo());
        }
        Ok(resultado)
    }

    async fn cambiar_estado(
        &self,
        id: &str,
        estado: EstadoEmprendedor,
    ) -> AppResult<OperationResult<Emprendedor>> {
        self.update(
            id,
            UpdateEmprendedor {
                estado: Some(estado),
                ..Default::default()
            },
        )
        .await
    }

    async fn actualizar_puntuacion(
        &self,
        id: &str,
        puntuacion: f64,
    ) -> AppResult<OperationResult<Emprendedor>> {
        if !(PUNTUACION_MINIMA..=PUNTUACION_MAXIMA).contains(&puntuacion) {
            return Ok(OperationResult::failure(
                "Puntuación debe estar entre 0 y 5",
                "Puntuación inválida",
            ));
        }

        let resultado = self
            .aplicar(
                id,
                Box::new(move |emprendedor: &mut Emprendedor| {
                    emprendedor.actualizar_puntuacion(puntuacion);
                    Ok(())
                }),
            )
            .await;

        if let Some(e) = resultado.data() {
            info!(
                "Puntuación actualizada para {}: {}/5",
                e.nombre_completo(),
                puntuacion
            );
        }
        Ok(resultado)
    }

    async fn agregar_red_social(
        &self,
        id: &str,
        red: RedSocialInput,
    ) -> AppResult<OperationResult<Emprendedor>> {
        let resultado = self
            .aplicar(
                id,
                Box::new(move |emprendedor: &mut Emprendedor| {
                    red.to_red_social()
                        .and_then(|red| emprendedor.agregar_red_social(red))
                        .map_err(|err| {
                            OperationResult::failure(
                                err.to_string(),
                                "No se pudo agregar la red social",
                            )
                        })
                }),
            )
            .await;
        Ok(resultado)
    }

    async fn remover_red_social(
        &self,
        id: &str,
        plataforma: PlataformaRedSocial,
    ) -> AppResult<OperationResult<Emprendedor>> {
        let resultado = self
            .aplicar(
                id,
                Box::new(move |emprendedor: &mut Emprendedor| {
                    if emprendedor.remover_red_social(plataforma) {
                        return Ok(());
                    }
                    Err(OperationResult::failure(
                        format!("No existe una cuenta de {}", plataforma),
                        "Red social no encontrada",
                    ))
                }),
            )
            .await;
        Ok(resultado)
    }

    async fn email_disponible(&self, email: &str) -> AppResult<bool> {
        Ok(!self.repo.exists_email(email).await?)
    }

    async fn list_alta_puntuacion(&self) -> AppResult<Vec<Emprendedor>> {
        let emprendedores = self.repo.list().await?;
        Ok(emprendedores
            .into_iter()
            .filter(Emprendedor::tiene_buena_puntuacion)
            .collect())
    }

    async fn buscar_por_especialidad(&self, texto: &str) -> AppResult<Vec<Emprendedor>> {
        let buscado = texto.to_lowercase();
        let emprendedores = self.repo.list().await?;
        Ok(emprendedores
            .into_iter()
            .filter(|e| e.especialidad().as_str().to_lowercase().contains(&buscado))
            .collect())
    }

    async fn estadisticas(&self) -> AppResult<EstadisticasEmprendedores> {
        let emprendedores = self.repo.list().await?;

        let mut stats = EstadisticasEmprendedores {
            total: emprendedores.len(),
            por_estado: BTreeMap::new(),
            por_sector: BTreeMap::new(),
            por_experiencia: BTreeMap::new(),
            puntuacion_promedio: 0.0,
            verificados: 0,
            alta_puntuacion: 0,
        };

        let mut suma = 0.0;
        for emprendedor in &emprendedores {
            *stats.por_estado.entry(emprendedor.estado()).or_insert(0) += 1;
            *stats.por_sector.entry(emprendedor.sector()).or_insert(0) += 1;
            *stats
                .por_experiencia
                .entry(emprendedor.experiencia())
                .or_insert(0) += 1;

            suma += emprendedor.puntuacion();
            if emprendedor.esta_verificado() {
                stats.verificados += 1;
            }
            if emprendedor.tiene_buena_puntuacion() {
                stats.alta_puntuacion += 1;
            }
        }

        if !emprendedores.is_empty() {
            stats.puntuacion_promedio = redondear(suma / emprendedores.len() as f64);
        }

        Ok(stats)
    }
}
