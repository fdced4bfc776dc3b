//! Repository layer for data access.

mod cliente_repository;
mod emprendedor_repository;
pub mod seed;
mod store;
mod usuario_repository;

pub use cliente_repository::{ClienteRepository, ClienteStore};
pub use emprendedor_repository::{EmprendedorRepository, EmprendedorStore};
pub use store::{Cambio, MemoryStore};
pub use usuario_repository::{UsuarioRepository, UsuarioStore};

pub(crate) use emprendedor_repository::redondear;

#[cfg(any(test, feature = "test-utils"))]
pub use cliente_repository::MockClienteRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use emprendedor_repository::MockEmprendedorRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use usuario_repository::MockUsuarioRepository;
