//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Value objects validate on construction; entities own their state
//! transitions; `*Response` types are the serializable views.

#[macro_use]
mod macros;

pub mod cliente;
pub mod constants;
pub mod documento;
pub mod emprendedor;
pub mod entity;
pub mod error;
pub mod identity;
pub mod password;
pub mod perfil;
pub mod usuario;
pub mod validation;

pub use cliente::{
    calcular_edad, CategoriaCliente, Cliente, ClienteResponse, CreateCliente, DireccionInput,
    DireccionResponse, EstadoCliente, UpdateCliente,
};
pub use constants::*;
pub use documento::{Direccion, NumeroDocumento, TipoDocumento};
pub use emprendedor::{
    CreateEmprendedor, Emprendedor, EmprendedorResponse, EstadoEmprendedor, NivelExperiencia,
    RedSocialInput, SectorEmprendimiento, UpdateEmprendedor,
};
pub use entity::{generate_id, Entity};
pub use error::{DomainError, DomainResult};
pub use identity::{Email, Username};
pub use password::Password;
pub use perfil::{Biografia, Especialidad, PlataformaRedSocial, RedSocial};
pub use usuario::{CreateUsuario, EstadoUsuario, RolUsuario, UpdateUsuario, Usuario, UsuarioResponse};
