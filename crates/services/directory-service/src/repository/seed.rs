//! Fixture records loaded into fresh stores when seeding is enabled.

use chrono::NaiveDate;

use domain::{
    Biografia, CategoriaCliente, Cliente, Direccion, DomainError, DomainResult, Email,
    Emprendedor, Especialidad, NivelExperiencia, NumeroDocumento, Password, PlataformaRedSocial,
    RedSocial, RolUsuario, SectorEmprendimiento, TipoDocumento, UpdateCliente, Username,
    Usuario,
};

fn fecha(anio: i32, mes: u32, dia: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(anio, mes, dia)
        .ok_or_else(|| DomainError::internal(format!("Fecha inválida {}-{}-{}", anio, mes, dia)))
}

#[allow(clippy::too_many_arguments)]
fn usuario(
    id: &str,
    username: &str,
    email: &str,
    password: &str,
    nombre: &str,
    apellido: &str,
    rol: RolUsuario,
    telefono: &str,
) -> DomainResult<Usuario> {
    Ok(Usuario::new(
        id.to_string(),
        Username::new(username)?,
        Email::new(email)?,
        Password::new(password)?,
        nombre.to_string(),
        apellido.to_string(),
        rol,
        Some(telefono.to_string()),
    ))
}

/// Administrator, emprendedor and cliente accounts.
pub fn usuarios() -> DomainResult<Vec<Usuario>> {
    Ok(vec![
        usuario(
            "admin-001",
            "admin",
            "admin@emprendimiento.com",
            "Admin123$",
            "Carlos",
            "Administrador",
            RolUsuario::Administrador,
            "+57-300-1234567",
        )?,
        usuario(
            "emp-001",
            "maria_tech",
            "maria@techstartup.com",
            "Emprendedor123$",
            "María",
            "González",
            RolUsuario::Emprendedor,
            "+57-310-9876543",
        )?,
        usuario(
            "cli-001",
            "juan_cliente",
            "juan@email.com",
            "Cliente123$",
            "Juan",
            "Pérez",
            RolUsuario::Cliente,
            "+57-320-5555555",
        )?,
    ])
}

struct ClienteSeed<'a> {
    id: &'a str,
    nombre: &'a str,
    apellido: &'a str,
    email: &'a str,
    telefono: &'a str,
    tipo: TipoDocumento,
    numero: &'a str,
    nacimiento: (i32, u32, u32),
    direccion: (&'a str, &'a str, &'a str, Option<&'a str>),
    usuario_id: Option<&'a str>,
    categoria: CategoriaCliente,
}

impl ClienteSeed<'_> {
    fn build(self) -> DomainResult<Cliente> {
        let (anio, mes, dia) = self.nacimiento;
        let (calle, ciudad, departamento, codigo_postal) = self.direccion;

        let mut cliente = Cliente::new(
            self.id.to_string(),
            self.nombre.to_string(),
            self.apellido.to_string(),
            Email::new(self.email)?,
            self.telefono.to_string(),
            self.tipo,
            NumeroDocumento::new(self.numero, self.tipo)?,
            fecha(anio, mes, dia)?,
            Direccion::new(calle, ciudad, departamento, codigo_postal)?,
            self.usuario_id.map(str::to_string),
        );
        cliente.actualizar_informacion(&UpdateCliente {
            categoria: Some(self.categoria),
            ..Default::default()
        })?;
        Ok(cliente)
    }
}

/// Three clientes across the upper categories, one with a passport.
pub fn clientes() -> DomainResult<Vec<Cliente>> {
    [
        ClienteSeed {
            id: "cli-001",
            nombre: "Ana",
            apellido: "Rodríguez",
            email: "ana.rodriguez@email.com",
            telefono: "+57-311-2468135",
            tipo: TipoDocumento::Cedula,
            numero: "12345678",
            nacimiento: (1990, 5, 15),
            direccion: ("Calle 123 #45-67", "Bogotá", "Cundinamarca", Some("110111")),
            usuario_id: Some("cli-001"),
            categoria: CategoriaCliente::Oro,
        },
        ClienteSeed {
            id: "cli-002",
            nombre: "Carlos",
            apellido: "Méndez",
            email: "carlos.mendez@gmail.com",
            telefono: "+57-320-9753186",
            tipo: TipoDocumento::Cedula,
            numero: "87654321",
            nacimiento: (1985, 12, 3),
            direccion: ("Carrera 50 #30-25", "Medellín", "Antioquia", Some("050001")),
            usuario_id: None,
            categoria: CategoriaCliente::Plata,
        },
        ClienteSeed {
            id: "cli-003",
            nombre: "Sophia",
            apellido: "Johnson",
            email: "sophia.johnson@international.com",
            telefono: "+1-555-0123456",
            tipo: TipoDocumento::Passport,
            numero: "AB1234567",
            nacimiento: (1992, 8, 20),
            direccion: ("International Street 456", "Cartagena", "Bolívar", None),
            usuario_id: None,
            categoria: CategoriaCliente::Platino,
        },
    ]
    .into_iter()
    .map(ClienteSeed::build)
    .collect()
}

fn red(plataforma: PlataformaRedSocial, url: &str, nombre_usuario: &str) -> DomainResult<RedSocial> {
    RedSocial::new(plataforma, url, nombre_usuario)
}

/// One verified, one active and one pending emprendedor.
pub fn emprendedores() -> DomainResult<Vec<Emprendedor>> {
    let mut laura = Emprendedor::new(
        "emp-001".to_string(),
        "Laura".to_string(),
        "Martínez".to_string(),
        Email::new("laura.martinez@techstartup.com")?,
        "+57-315-7894561".to_string(),
        Especialidad::new("Desarrollo de Software")?,
        Biografia::new(
            "Desarrolladora Full Stack con 8 años de experiencia en crear soluciones tecnológicas \
             innovadoras para startups. Especializada en React, Node.js y arquitecturas cloud. \
             Fundadora de 3 empresas exitosas en el sector fintech.",
        )?,
        SectorEmprendimiento::Tecnologia,
        NivelExperiencia::Experto,
        Some("emp-001".to_string()),
        vec![
            red(
                PlataformaRedSocial::Linkedin,
                "https://linkedin.com/in/laura-martinez-dev",
                "laura-martinez-dev",
            )?,
            red(
                PlataformaRedSocial::Twitter,
                "https://twitter.com/laura_codes",
                "laura_codes",
            )?,
        ],
    )?;
    laura.verificar();
    laura.actualizar_puntuacion(4.8);

    let mut diego = Emprendedor::new(
        "emp-002".to_string(),
        "Diego".to_string(),
        "Ramírez".to_string(),
        Email::new("diego.ramirez@foodie.com")?,
        "+57-300-1122334".to_string(),
        Especialidad::new("Chef y Creación de Productos Alimenticios")?,
        Biografia::new(
            "Chef profesional con experiencia en restaurantes de alta cocina. Especializado en \
             comida saludable y sostenible, con certificaciones internacionales en nutrición y \
             manejo de alimentos orgánicos.",
        )?,
        SectorEmprendimiento::Alimentacion,
        NivelExperiencia::Avanzado,
        None,
        vec![
            red(
                PlataformaRedSocial::Instagram,
                "https://instagram.com/chef_diego_gourmet",
                "chef_diego_gourmet",
            )?,
            red(
                PlataformaRedSocial::Youtube,
                "https://youtube.com/c/DiegoGourmetChannel",
                "DiegoGourmetChannel",
            )?,
        ],
    )?;
    diego.activar();
    diego.actualizar_puntuacion(4.5);

    let mut camila = Emprendedor::new(
        "emp-003".to_string(),
        "Camila".to_string(),
        "Torres".to_string(),
        Email::new("camila.torres@fashiondesign.com")?,
        "+57-310-5566778".to_string(),
        Especialidad::new("Diseño de Moda Sostenible")?,
        Biografia::new(
            "Diseñadora de modas enfocada en crear piezas únicas utilizando materiales reciclados \
             y técnicas artesanales tradicionales colombianas. Graduada de diseño con \
             especialización en sostenibilidad.",
        )?,
        SectorEmprendimiento::Moda,
        NivelExperiencia::Intermedio,
        Some("emp-003".to_string()),
        vec![
            red(
                PlataformaRedSocial::Instagram,
                "https://instagram.com/camila_eco_fashion",
                "camila_eco_fashion",
            )?,
            red(
                PlataformaRedSocial::Facebook,
                "https://facebook.com/CamilaEcoFashion",
                "CamilaEcoFashion",
            )?,
        ],
    )?;
    camila.actualizar_puntuacion(4.2);

    Ok(vec![laura, diego, camila])
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Entity, EstadoEmprendedor};

    #[test]
    fn test_fixtures_are_valid() {
        assert_eq!(usuarios().unwrap().len(), 3);
        assert_eq!(clientes().unwrap().len(), 3);
        assert_eq!(emprendedores().unwrap().len(), 3);
    }

    #[test]
    fn test_fixture_states() {
        let clientes = clientes().unwrap();
        assert_eq!(clientes[0].categoria(), CategoriaCliente::Oro);
        assert_eq!(clientes[2].numero_documento().as_str(), "1234567");
        assert!(clientes[2].direccion().codigo_postal().is_none());

        let emprendedores = emprendedores().unwrap();
        assert_eq!(emprendedores[0].id(), "emp-001");
        assert!(emprendedores[0].esta_verificado());
        assert!(emprendedores[0].fecha_verificacion().is_some());
        assert_eq!(emprendedores[1].estado(), EstadoEmprendedor::Activo);
        assert_eq!(
            emprendedores[2].estado(),
            EstadoEmprendedor::PendienteVerificacion
        );
    }
}
