//! Service layer - orchestrates repositories and adds business rules.

mod cliente_service;
mod emprendedor_service;
mod usuario_service;

pub use cliente_service::{ClienteManager, ClienteService, EstadisticasClientes};
pub use emprendedor_service::{EmprendedorManager, EmprendedorService, EstadisticasEmprendedores};
pub use usuario_service::{EstadisticasUsuarios, UsuarioManager, UsuarioService};

use common::{AppError, AppResult, OperationResult};

/// Reject a blank lookup key.
fn requerido(valor: &str, mensaje: &str) -> AppResult<()> {
    if valor.trim().is_empty() {
        return Err(AppError::bad_request(mensaje));
    }
    Ok(())
}

/// Fold a repository error on the update path into a failure result.
fn resultado_actualizacion<T>(
    entidad: &str,
    resultado: AppResult<OperationResult<T>>,
) -> OperationResult<T> {
    resultado.unwrap_or_else(|err| {
        OperationResult::failure(err.user_message(), format!("Error actualizando {}", entidad))
    })
}

fn id_requerido<T>(entidad: &str) -> OperationResult<T> {
    OperationResult::failure(format!("ID de {} requerido", entidad), "Parámetros inválidos")
}
