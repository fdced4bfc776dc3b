//! Emprendedor repository backed by the in-memory store.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use common::{AppError, AppResult, OperationResult};
use domain::{
    generate_id, Biografia, CreateEmprendedor, Email, Emprendedor, Entity, Especialidad,
    EstadoEmprendedor, NivelExperiencia, RedSocialInput, SectorEmprendimiento,
    UpdateEmprendedor, DEFAULT_LIMITE_MEJOR_PUNTUADOS,
};

use super::store::{simulate_latency, Cambio, MemoryStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Emprendedor repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmprendedorRepository: Send + Sync {
    /// Create a new emprendedor; fails on duplicate email or repeated platforms
    async fn create(&self, datos: CreateEmprendedor) -> AppResult<Emprendedor>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Emprendedor>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Emprendedor>>;

    async fn find_by_usuario_id(&self, usuario_id: &str) -> AppResult<Option<Emprendedor>>;

    async fn list(&self) -> AppResult<Vec<Emprendedor>>;

    async fn find_by_estado(&self, estado: EstadoEmprendedor) -> AppResult<Vec<Emprendedor>>;

    async fn find_by_sector(&self, sector: SectorEmprendimiento) -> AppResult<Vec<Emprendedor>>;

    async fn find_by_experiencia(
        &self,
        experiencia: NivelExperiencia,
    ) -> AppResult<Vec<Emprendedor>>;

    async fn list_verificados(&self) -> AppResult<Vec<Emprendedor>>;

    /// Highest rated first, at most `limite` (10 when `None`)
    async fn list_mejor_puntuados(&self, limite: Option<usize>) -> AppResult<Vec<Emprendedor>>;

    /// Apply a partial update; invalid fields leave the emprendedor untouched
    async fn update(
        &self,
        id: &str,
        datos: UpdateEmprendedor,
    ) -> AppResult<OperationResult<Emprendedor>>;

    /// Persist an already mutated emprendedor
    async fn save(&self, emprendedor: Emprendedor) -> AppResult<OperationResult<Emprendedor>>;

    /// Apply a guarded change atomically; a failure from `cambio` is returned as is
    async fn modify(
        &self,
        id: &str,
        cambio: Cambio<Emprendedor>,
    ) -> AppResult<OperationResult<Emprendedor>>;

    async fn delete(&self, id: &str) -> AppResult<bool>;

    async fn exists_email(&self, email: &str) -> AppResult<bool>;

    /// Number of emprendedores per sector, every sector present
    async fn count_by_sector(&self) -> AppResult<BTreeMap<SectorEmprendimiento, usize>>;

    async fn count_verificados(&self) -> AppResult<usize>;

    /// Mean rating rounded to two decimals, 0 when empty
    async fn puntuacion_promedio(&self) -> AppResult<f64>;
}

/// Concrete implementation of EmprendedorRepository
pub struct EmprendedorStore {
    store: MemoryStore<Emprendedor>,
    latency: Duration,
}

impl EmprendedorStore {
    /// Create new repository instance over a shared store
    pub fn new(store: MemoryStore<Emprendedor>, latency: Duration) -> Self {
        Self { store, latency }
    }
}

fn no_encontrado(id: &str) -> OperationResult<Emprendedor> {
    OperationResult::failure(
        format!("Emprendedor con ID '{}' no encontrado", id),
        "Emprendedor no existe",
    )
}

/// Round to two decimal places.
pub(crate) fn redondear(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

#[async_trait]
impl EmprendedorRepository for EmprendedorStore {
    async fn create(&self, datos: CreateEmprendedor) -> AppResult<Emprendedor> {
        simulate_latency(self.latency).await;

        let mut emprendedores = self.store.lock().await;

        let email = Email::normalize(&datos.email);
        if emprendedores.values().any(|e| e.email().as_str() == email) {
            return Err(AppError::conflict(format!("Email '{}'", email)));
        }

        let emprendedor = Emprendedor::new(
            generate_id(),
            datos.nombre.trim().to_string(),
            datos.apellido.trim().to_string(),
            Email::new(&datos.email)?,
            datos.telefono.trim().to_string(),
            Especialidad::new(&datos.especialidad)?,
            Biografia::new(&datos.biografia)?,
            datos.sector,
            datos.experiencia,
            datos.usuario_id,
            RedSocialInput::to_redes(&datos.redes_sociales)?,
        )?;

        emprendedores.insert(emprendedor.id().to_string(), emprendedor.clone());
        debug!(id = %emprendedor.id(), email = %emprendedor.email(), "Emprendedor stored");

        Ok(emprendedor)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Emprendedor>> {
        simulate_latency(self.latency).await;
        Ok(self.store.get(id).await)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Emprendedor>> {
        simulate_latency(self.latency).await;
        Ok(self.store.find(|e| e.email().matches(email)).await)
    }

    async fn find_by_usuario_id(&self, usuario_id: &str) -> AppResult<Option<Emprendedor>> {
        simulate_latency(self.latency).await;
        Ok(self
            .store
            .find(|e| e.usuario_id() == Some(usuario_id))
            .await)
    }

    async fn list(&self) -> AppResult<Vec<Emprendedor>> {
        simulate_latency(self.latency).await;
        Ok(self.store.all().await)
    }

    async fn find_by_estado(&self, estado: EstadoEmprendedor) -> AppResult<Vec<Emprendedor>> {
        simulate_latency(self.latency).await;
        Ok(self.store.filter(|e| e.estado() == estado).await)
    }

    async fn find_by_sector(&self, sector: SectorEmprendimiento) -> AppResult<Vec<Emprendedor>> {
        simulate_latency(self.latency).await;
        Ok(self.store.filter(|e| e.sector() == sector).await)
    }

    async fn find_by_experiencia(
        &self,
        experiencia: NivelExperiencia,
    ) -> AppResult<Vec<Emprendedor>> {
        simulate_latency(self.latency).await;
        Ok(self.store.filter(|e| e.experiencia() == experiencia).await)
    }

    async fn list_verificados(&self) -> AppResult<Vec<Emprendedor>> {
        simulate_latency(self.latency).await;
        Ok(self.store.filter(Emprendedor::esta_verificado).await)
    }

    async fn list_mejor_puntuados(&self, limite: Option<usize>) -> AppResult<Vec<Emprendedor>> {
        simulate_latency(self.latency).await;

        let mut emprendedores = self.store.all().await;
        emprendedores.sort_by(|a, b| b.puntuacion().total_cmp(&a.puntuacion()));
        emprendedores.truncate(limite.unwrap_or(DEFAULT_LIMITE_MEJOR_PUNTUADOS));
        Ok(emprendedores)
    }

    async fn update(
        &self,
        id: &str,
        datos: UpdateEmprendedor,
    ) -> AppResult<OperationResult<Emprendedor>> {
        simulate_latency(self.latency).await;

        let mut emprendedores = self.store.lock().await;
        let Some(emprendedor) = emprendedores.get_mut(id) else {
            return Ok(no_encontrado(id));
        };

        emprendedor.actualizar_informacion(&datos)?;
        debug!(id = %id, "Emprendedor updated");

        Ok(OperationResult::success(
            emprendedor.clone(),
            "Emprendedor actualizado exitosamente",
        ))
    }

    async fn save(&self, emprendedor: Emprendedor) -> AppResult<OperationResult<Emprendedor>> {
        simulate_latency(self.latency).await;

        let id = emprendedor.id().to_string();
        if !self.store.replace(emprendedor.clone()).await {
            return Ok(no_encontrado(&id));
        }
        debug!(id = %id, "Emprendedor saved");

        Ok(OperationResult::success(
            emprendedor,
            "Emprendedor guardado exitosamente",
        ))
    }

    async fn modify(
        &self,
        id: &str,
        cambio: Cambio<Emprendedor>,
    ) -> AppResult<OperationResult<Emprendedor>> {
        simulate_latency(self.latency).await;

        let resultado = match self.store.modify(id, cambio).await {
            None => no_encontrado(id),
            Some(Ok(emprendedor)) => {
                debug!(id = %id, "Emprendedor modified");
                OperationResult::success(emprendedor, "Emprendedor actualizado exitosamente")
            }
            Some(Err(fallo)) => fallo,
        };
        Ok(resultado)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        simulate_latency(self.latency).await;
        let removed = self.store.remove(id).await;
        debug!(id = %id, removed, "Emprendedor delete");
        Ok(removed)
    }

    async fn exists_email(&self, email: &str) -> AppResult<bool> {
        simulate_latency(self.latency).await;
        Ok(self.store.any(|e| e.email().matches(email)).await)
    }

    async fn count_by_sector(&self) -> AppResult<BTreeMap<SectorEmprendimiento, usize>> {
        simulate_latency(self.latency).await;

        let mut conteo: BTreeMap<SectorEmprendimiento, usize> =
            SectorEmprendimiento::ALL.iter().map(|s| (*s, 0)).collect();
        for emprendedor in self.store.all().await {
            *conteo.entry(emprendedor.sector()).or_default() += 1;
        }
        Ok(conteo)
    }

    async fn count_verificados(&self) -> AppResult<usize> {
        simulate_latency(self.latency).await;
        Ok(self.store.filter(Emprendedor::esta_verificado).await.len())
    }

    async fn puntuacion_promedio(&self) -> AppResult<f64> {
        simulate_latency(self.latency).await;

        let emprendedores = self.store.all().await;
        if emprendedores.is_empty() {
            return Ok(0.0);
        }
        let total: f64 = emprendedores.iter().map(Emprendedor::puntuacion).sum();
        Ok(redondear(total / emprendedores.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{DomainError, PlataformaRedSocial};

    fn repo() -> EmprendedorStore {
        EmprendedorStore::new(MemoryStore::new(), Duration::ZERO)
    }

    fn instagram(handle: &str) -> RedSocialInput {
        RedSocialInput {
            plataforma: PlataformaRedSocial::Instagram,
            url: format!("https://instagram.com/{}", handle),
            nombre_usuario: handle.to_string(),
        }
    }

    fn dto(email: &str) -> CreateEmprendedor {
        CreateEmprendedor {
            nombre: "Diego".to_string(),
            apellido: "Ramírez".to_string(),
            email: email.to_string(),
            telefono: "+57-300-1122334".to_string(),
            especialidad: "Chef y Creación de Productos Alimenticios".to_string(),
            biografia: "Chef profesional con experiencia en cocina de autor".to_string(),
            sector: SectorEmprendimiento::Alimentacion,
            experiencia: NivelExperiencia::Avanzado,
            usuario_id: None,
            redes_sociales: vec![instagram("chef_diego_gourmet")],
        }
    }

    async fn con_puntuacion(repo: &EmprendedorStore, email: &str, puntuacion: f64) -> Emprendedor {
        let mut emprendedor = repo.create(dto(email)).await.unwrap();
        emprendedor.actualizar_puntuacion(puntuacion);
        repo.save(emprendedor).await.unwrap().into_data().unwrap()
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending() {
        let emprendedor = repo().create(dto("diego@foodie.com")).await.unwrap();

        assert_eq!(emprendedor.estado(), EstadoEmprendedor::PendienteVerificacion);
        assert_eq!(emprendedor.redes_sociales().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_repeated_platform() {
        let repo = repo();
        let mut datos = dto("diego@foodie.com");
        datos.redes_sociales.push(instagram("otro"));

        let err = repo.create(datos).await.unwrap_err();
        assert_eq!(
            err,
            AppError::from(DomainError::DuplicatePlatform(PlataformaRedSocial::Instagram))
        );
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = repo();
        repo.create(dto("diego@foodie.com")).await.unwrap();

        let err = repo.create(dto(" Diego@Foodie.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_mejor_puntuados_sorted_and_limited() {
        let repo = repo();
        con_puntuacion(&repo, "a@foodie.com", 3.0).await;
        con_puntuacion(&repo, "b@foodie.com", 4.8).await;
        con_puntuacion(&repo, "c@foodie.com", 4.2).await;

        let top = repo.list_mejor_puntuados(Some(2)).await.unwrap();
        let puntuaciones: Vec<f64> = top.iter().map(Emprendedor::puntuacion).collect();
        assert_eq!(puntuaciones, vec![4.8, 4.2]);

        assert_eq!(repo.list_mejor_puntuados(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_puntuacion_promedio() {
        let repo = repo();
        assert_eq!(repo.puntuacion_promedio().await.unwrap(), 0.0);

        con_puntuacion(&repo, "a@foodie.com", 4.8).await;
        con_puntuacion(&repo, "b@foodie.com", 4.5).await;
        con_puntuacion(&repo, "c@foodie.com", 4.2).await;

        assert_eq!(repo.puntuacion_promedio().await.unwrap(), 4.5);
    }

    #[tokio::test]
    async fn test_verificados_and_sector_counts() {
        let repo = repo();
        let mut emprendedor = repo.create(dto("diego@foodie.com")).await.unwrap();
        repo.create(dto("otro@foodie.com")).await.unwrap();

        emprendedor.verificar();
        repo.save(emprendedor).await.unwrap();

        assert_eq!(repo.count_verificados().await.unwrap(), 1);
        assert_eq!(repo.list_verificados().await.unwrap().len(), 1);

        let conteo = repo.count_by_sector().await.unwrap();
        assert_eq!(conteo.len(), SectorEmprendimiento::ALL.len());
        assert_eq!(conteo[&SectorEmprendimiento::Alimentacion], 2);
        assert_eq!(conteo[&SectorEmprendimiento::Moda], 0);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = repo();
        repo.create(dto("diego@foodie.com")).await.unwrap();

        assert!(!repo.delete("no-existe").await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_modify_applies_change() {
        let repo = repo();
        let emprendedor = repo.create(dto("diego@foodie.com")).await.unwrap();

        let result = repo
            .modify(
                emprendedor.id(),
                Box::new(|e| {
                    e.verificar();
                    Ok(())
                }),
            )
            .await
            .unwrap();

        assert_eq!(result.message(), Some("Emprendedor actualizado exitosamente"));
        assert_eq!(repo.count_verificados().await.unwrap(), 1);
    }

    #[test]
    fn test_redondear() {
        assert_eq!(redondear(4.166_666), 4.17);
        assert_eq!(redondear(0.0), 0.0);
    }
}
