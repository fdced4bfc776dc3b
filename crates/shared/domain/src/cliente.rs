//! Cliente domain entity and related types.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::EDAD_MINIMA_CLIENTE;
use crate::documento::{Direccion, NumeroDocumento, TipoDocumento};
use crate::entity::Entity;
use crate::error::DomainResult;
use crate::identity::Email;
use crate::validation::{apellido_valido, no_vacio, nombre_valido, telefono_valido};

string_enum! {
    /// Cliente status.
    pub enum EstadoCliente ("Estado de cliente") {
        Activo => "ACTIVO",
        Inactivo => "INACTIVO",
        Bloqueado => "BLOQUEADO",
    }
}

string_enum! {
    /// Loyalty ladder, lowest first.
    pub enum CategoriaCliente ("Categoría de cliente") {
        Bronce => "BRONCE",
        Plata => "PLATA",
        Oro => "ORO",
        Platino => "PLATINO",
    }
}

impl CategoriaCliente {
    /// Next rung on the ladder, `None` at the top.
    pub fn siguiente(&self) -> Option<CategoriaCliente> {
        match self {
            CategoriaCliente::Bronce => Some(CategoriaCliente::Plata),
            CategoriaCliente::Plata => Some(CategoriaCliente::Oro),
            CategoriaCliente::Oro => Some(CategoriaCliente::Platino),
            CategoriaCliente::Platino => None,
        }
    }

    pub fn es_vip(&self) -> bool {
        matches!(self, CategoriaCliente::Oro | CategoriaCliente::Platino)
    }
}

/// Whole years elapsed between `nacimiento` and `hoy`.
///
/// One year is subtracted while this year's birthday is still ahead.
pub fn calcular_edad(nacimiento: NaiveDate, hoy: NaiveDate) -> u32 {
    let mut edad = hoy.year() - nacimiento.year();
    if (hoy.month(), hoy.day()) < (nacimiento.month(), nacimiento.day()) {
        edad -= 1;
    }
    edad.max(0) as u32
}

/// Today's date on the local calendar.
pub fn hoy() -> NaiveDate {
    Local::now().date_naive()
}

/// Cliente domain entity
#[derive(Debug, Clone)]
pub struct Cliente {
    id: String,
    nombre: String,
    apellido: String,
    email: Email,
    telefono: String,
    tipo_documento: TipoDocumento,
    numero_documento: NumeroDocumento,
    fecha_nacimiento: NaiveDate,
    direccion: Direccion,
    estado: EstadoCliente,
    categoria: CategoriaCliente,
    usuario_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Cliente {
    /// Create a new active cliente in the lowest category
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        nombre: String,
        apellido: String,
        email: Email,
        telefono: String,
        tipo_documento: TipoDocumento,
        numero_documento: NumeroDocumento,
        fecha_nacimiento: NaiveDate,
        direccion: Direccion,
        usuario_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            nombre,
            apellido,
            email,
            telefono,
            tipo_documento,
            numero_documento,
            fecha_nacimiento,
            direccion,
            estado: EstadoCliente::Activo,
            categoria: CategoriaCliente::Bronce,
            usuario_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn apellido(&self) -> &str {
        &self.apellido
    }

    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn telefono(&self) -> &str {
        &self.telefono
    }

    pub fn tipo_documento(&self) -> TipoDocumento {
        self.tipo_documento
    }

    pub fn numero_documento(&self) -> &NumeroDocumento {
        &self.numero_documento
    }

    /// Whether this cliente holds the given document (number compared digits-only).
    pub fn tiene_documento(&self, tipo: TipoDocumento, numero: &str) -> bool {
        self.tipo_documento == tipo
            && self.numero_documento.as_str() == NumeroDocumento::limpiar(numero)
    }

    pub fn fecha_nacimiento(&self) -> NaiveDate {
        self.fecha_nacimiento
    }

    pub fn direccion(&self) -> &Direccion {
        &self.direccion
    }

    pub fn estado(&self) -> EstadoCliente {
        self.estado
    }

    pub fn categoria(&self) -> CategoriaCliente {
        self.categoria
    }

    pub fn usuario_id(&self) -> Option<&str> {
        self.usuario_id.as_deref()
    }

    /// Age as of today.
    pub fn edad(&self) -> u32 {
        self.edad_en(hoy())
    }

    /// Age as of the given date.
    pub fn edad_en(&self, hoy: NaiveDate) -> u32 {
        calcular_edad(self.fecha_nacimiento, hoy)
    }

    pub fn es_mayor_de_edad(&self) -> bool {
        self.edad() >= EDAD_MINIMA_CLIENTE
    }

    /// Apply the provided subset of fields.
    ///
    /// A new direccion is validated before anything is changed.
    pub fn actualizar_informacion(&mut self, datos: &UpdateCliente) -> DomainResult<()> {
        let direccion = datos
            .direccion
            .as_ref()
            .map(DireccionInput::to_direccion)
            .transpose()?;

        if let Some(nombre) = datos.nombre.as_deref().filter(|n| !n.is_empty()) {
            self.nombre = nombre.to_string();
        }
        if let Some(apellido) = datos.apellido.as_deref().filter(|a| !a.is_empty()) {
            self.apellido = apellido.to_string();
        }
        if let Some(telefono) = datos.telefono.as_deref().filter(|t| !t.is_empty()) {
            self.telefono = telefono.to_string();
        }
        if let Some(direccion) = direccion {
            self.direccion = direccion;
        }
        if let Some(estado) = datos.estado {
            self.estado = estado;
        }
        if let Some(categoria) = datos.categoria {
            self.categoria = categoria;
        }
        self.touch();
        Ok(())
    }

    pub fn activar(&mut self) {
        self.estado = EstadoCliente::Activo;
        self.touch();
    }

    pub fn desactivar(&mut self) {
        self.estado = EstadoCliente::Inactivo;
        self.touch();
    }

    pub fn bloquear(&mut self) {
        self.estado = EstadoCliente::Bloqueado;
        self.touch();
    }

    /// Move one step up the category ladder. Returns `false` at PLATINO.
    pub fn ascender_categoria(&mut self) -> bool {
        match self.categoria.siguiente() {
            Some(siguiente) => {
                self.categoria = siguiente;
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn esta_activo(&self) -> bool {
        self.estado == EstadoCliente::Activo
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Cliente {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Address as received in a DTO
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DireccionInput {
    #[validate(custom(function = "no_vacio"))]
    pub calle: String,
    #[validate(custom(function = "no_vacio"))]
    pub ciudad: String,
    #[validate(custom(function = "no_vacio"))]
    pub departamento: String,
    pub codigo_postal: Option<String>,
}

impl DireccionInput {
    pub fn to_direccion(&self) -> DomainResult<Direccion> {
        Direccion::new(
            &self.calle,
            &self.ciudad,
            &self.departamento,
            self.codigo_postal.as_deref(),
        )
    }
}

/// Cliente creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCliente {
    #[validate(custom(function = "nombre_valido"))]
    pub nombre: String,
    #[validate(custom(function = "apellido_valido"))]
    pub apellido: String,
    pub email: String,
    #[validate(custom(function = "telefono_valido"))]
    pub telefono: String,
    pub tipo_documento: TipoDocumento,
    pub numero_documento: String,
    pub fecha_nacimiento: NaiveDate,
    #[validate(nested)]
    pub direccion: DireccionInput,
    /// Optional back-reference to a system usuario
    pub usuario_id: Option<String>,
}

/// Cliente update data transfer object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCliente {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<DireccionInput>,
    pub estado: Option<EstadoCliente>,
    pub categoria: Option<CategoriaCliente>,
}

/// Cliente view, including the derived age
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteResponse {
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: String,
    pub tipo_documento: TipoDocumento,
    pub numero_documento: String,
    pub fecha_nacimiento: NaiveDate,
    pub direccion: DireccionResponse,
    pub estado: EstadoCliente,
    pub categoria: CategoriaCliente,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<String>,
    pub edad: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DireccionResponse {
    pub calle: String,
    pub ciudad: String,
    pub departamento: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_postal: Option<String>,
}

impl From<&Direccion> for DireccionResponse {
    fn from(direccion: &Direccion) -> Self {
        Self {
            calle: direccion.calle().to_string(),
            ciudad: direccion.ciudad().to_string(),
            departamento: direccion.departamento().to_string(),
            codigo_postal: direccion.codigo_postal().map(str::to_string),
        }
    }
}

impl From<&Cliente> for ClienteResponse {
    fn from(cliente: &Cliente) -> Self {
        Self {
            id: cliente.id.clone(),
            nombre: cliente.nombre.clone(),
            apellido: cliente.apellido.clone(),
            email: cliente.email.to_string(),
            telefono: cliente.telefono.clone(),
            tipo_documento: cliente.tipo_documento,
            numero_documento: cliente.numero_documento.to_string(),
            fecha_nacimiento: cliente.fecha_nacimiento,
            direccion: DireccionResponse::from(&cliente.direccion),
            estado: cliente.estado,
            categoria: cliente.categoria,
            usuario_id: cliente.usuario_id.clone(),
            edad: cliente.edad(),
            created_at: cliente.created_at,
            updated_at: cliente.updated_at,
        }
    }
}

impl From<Cliente> for ClienteResponse {
    fn from(cliente: Cliente) -> Self {
        ClienteResponse::from(&cliente)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cliente(nacimiento: NaiveDate) -> Cliente {
        Cliente::new(
            "c-1".to_string(),
            "Ana".to_string(),
            "Rodríguez".to_string(),
            Email::new("ana.rodriguez@email.com").unwrap(),
            "+57-311-2468135".to_string(),
            TipoDocumento::Cedula,
            NumeroDocumento::new("12345678", TipoDocumento::Cedula).unwrap(),
            nacimiento,
            Direccion::new("Calle 123 #45-67", "Bogotá", "Cundinamarca", Some("110111")).unwrap(),
            None,
        )
    }

    #[test]
    fn test_edad_is_calendar_aware() {
        let c = cliente(fecha(2006, 5, 15));
        assert_eq!(c.edad_en(fecha(2024, 5, 14)), 17);
        assert_eq!(c.edad_en(fecha(2024, 5, 15)), 18);
        assert_eq!(c.edad_en(fecha(2024, 12, 31)), 18);
    }

    #[test]
    fn test_edad_leap_day_birthday() {
        let nacimiento = fecha(2004, 2, 29);
        assert_eq!(calcular_edad(nacimiento, fecha(2022, 2, 28)), 17);
        assert_eq!(calcular_edad(nacimiento, fecha(2022, 3, 1)), 18);
    }

    #[test]
    fn test_edad_never_negative() {
        assert_eq!(calcular_edad(fecha(2030, 1, 1), fecha(2024, 1, 1)), 0);
    }

    #[test]
    fn test_ascender_categoria_ladder() {
        let mut c = cliente(fecha(1990, 5, 15));
        assert_eq!(c.categoria(), CategoriaCliente::Bronce);

        assert!(c.ascender_categoria());
        assert!(c.ascender_categoria());
        assert!(c.ascender_categoria());
        assert_eq!(c.categoria(), CategoriaCliente::Platino);

        assert!(!c.ascender_categoria());
        assert_eq!(c.categoria(), CategoriaCliente::Platino);
    }

    #[test]
    fn test_invalid_direccion_leaves_cliente_untouched() {
        let mut c = cliente(fecha(1990, 5, 15));
        let result = c.actualizar_informacion(&UpdateCliente {
            nombre: Some("Otra".to_string()),
            direccion: Some(DireccionInput {
                calle: " ".to_string(),
                ciudad: "Cali".to_string(),
                departamento: "Valle".to_string(),
                codigo_postal: None,
            }),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(c.nombre(), "Ana");
        assert_eq!(c.direccion().ciudad(), "Bogotá");
    }

    #[test]
    fn test_actualizar_informacion_applies_subset() {
        let mut c = cliente(fecha(1990, 5, 15));
        c.actualizar_informacion(&UpdateCliente {
            categoria: Some(CategoriaCliente::Oro),
            estado: Some(EstadoCliente::Bloqueado),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(c.categoria(), CategoriaCliente::Oro);
        assert_eq!(c.estado(), EstadoCliente::Bloqueado);
        assert_eq!(c.telefono(), "+57-311-2468135");
    }

    #[test]
    fn test_tiene_documento_ignores_formatting() {
        let c = cliente(fecha(1990, 5, 15));
        assert!(c.tiene_documento(TipoDocumento::Cedula, "12.345.678"));
        assert!(!c.tiene_documento(TipoDocumento::Passport, "12345678"));
    }

    #[test]
    fn test_response_fields_match_getters() {
        let c = cliente(fecha(1990, 5, 15));
        let json = serde_json::to_value(ClienteResponse::from(&c)).unwrap();

        assert_eq!(json["email"], c.email().as_str());
        assert_eq!(json["tipoDocumento"], "CEDULA");
        assert_eq!(json["numeroDocumento"], "12345678");
        assert_eq!(json["fechaNacimiento"], "1990-05-15");
        assert_eq!(json["direccion"]["codigoPostal"], "110111");
        assert_eq!(json["categoria"], "BRONCE");
        assert_eq!(json["estado"], "ACTIVO");
        assert_eq!(json["edad"], c.edad());
        assert!(json.get("usuarioId").is_none());
    }

    #[test]
    fn test_vip_categories() {
        assert!(!CategoriaCliente::Plata.es_vip());
        assert!(CategoriaCliente::Oro.es_vip());
        assert!(CategoriaCliente::Platino.es_vip());
    }
}
