//! Scripted walkthrough over a `Directory`: create, read, update and delete
//! for each entity, a few state transitions, then statistics.

use chrono::NaiveDate;
use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::{
    CategoriaCliente, CreateCliente, CreateEmprendedor, CreateUsuario, DireccionInput, Entity,
    EstadoCliente, EstadoEmprendedor, EstadoUsuario, NivelExperiencia, PlataformaRedSocial,
    RedSocialInput, RolUsuario, SectorEmprendimiento, TipoDocumento, UpdateCliente,
    UpdateEmprendedor, UpdateUsuario,
};

use crate::Directory;

/// Run the whole walkthrough, stopping at the first hard error.
pub async fn run(directory: &Directory) -> AppResult<()> {
    let inicial = directory.estadisticas().await?;
    info!(
        "Usuarios: {} (activos: {}) | Clientes: {} (edad promedio: {} años) | Emprendedores: {} (verificados: {})",
        inicial.usuarios.total,
        inicial.usuarios.activos,
        inicial.clientes.total,
        inicial.clientes.edad_promedio,
        inicial.emprendedores.total,
        inicial.emprendedores.verificados
    );

    usuarios(directory).await?;
    clientes(directory).await?;
    emprendedores(directory).await?;

    let stats = directory.estadisticas().await?;
    let json = serde_json::to_string_pretty(&stats)
        .map_err(|e| AppError::internal(format!("Estadísticas no serializables: {}", e)))?;
    info!("Estadísticas finales:\n{}", json);

    Ok(())
}

async fn usuarios(directory: &Directory) -> AppResult<()> {
    let service = &directory.usuarios;
    info!("== Usuarios ==");

    let creado = service
        .create(CreateUsuario {
            username: "nuevousuario2024".to_string(),
            email: "nuevo@usuario.com".to_string(),
            password: "MiPassword123$".to_string(),
            nombre: "Roberto".to_string(),
            apellido: "Silva".to_string(),
            telefono: Some("+57-300-9876543".to_string()),
            rol: RolUsuario::Cliente,
        })
        .await?;
    info!("Usuario creado: {} - ID: {}", creado.nombre_completo(), creado.id());

    let todos = service.list().await?;
    info!("Usuarios encontrados: {}", todos.len());
    if let Some(admin) = service.get_by_username("admin").await? {
        info!("Usuario por username: {}", admin.nombre());
    }
    match service.autenticar("nuevousuario2024", "MiPassword123$").await? {
        Some(u) => info!("Autenticación correcta para {}", u.username()),
        None => warn!("Autenticación fallida para nuevousuario2024"),
    }

    let actualizado = service
        .update(
            creado.id(),
            UpdateUsuario {
                nombre: Some("Roberto Carlos".to_string()),
                telefono: Some("+57-310-1234567".to_string()),
                estado: Some(EstadoUsuario::Activo),
                ..Default::default()
            },
        )
        .await?;
    match actualizado.data() {
        Some(u) => info!("Usuario actualizado: {}", u.nombre_completo()),
        None => warn!("Error: {}", actualizado.error().unwrap_or_default()),
    }

    let eliminado = service.delete(creado.id()).await?;
    info!("Usuario eliminado: {}", eliminado);
    Ok(())
}

async fn clientes(directory: &Directory) -> AppResult<()> {
    let service = &directory.clientes;
    info!("== Clientes ==");

    let fecha_nacimiento = NaiveDate::from_ymd_opt(1988, 3, 15)
        .ok_or_else(|| AppError::internal("Fecha de nacimiento inválida"))?;
    let creado = service
        .create(CreateCliente {
            nombre: "Elena".to_string(),
            apellido: "Morales".to_string(),
            email: "elena.morales@email.com".to_string(),
            telefono: "+57-315-9876543".to_string(),
            tipo_documento: TipoDocumento::Cedula,
            numero_documento: "98765432".to_string(),
            fecha_nacimiento,
            direccion: DireccionInput {
                calle: "Avenida 68 #123-45".to_string(),
                ciudad: "Cali".to_string(),
                departamento: "Valle del Cauca".to_string(),
                codigo_postal: Some("760001".to_string()),
            },
            usuario_id: None,
        })
        .await?;
    info!("Cliente creado: {} - Edad: {} años", creado.nombre_completo(), creado.edad());

    info!("Clientes encontrados: {}", service.list().await?.len());
    info!("Clientes VIP: {}", service.list_vip().await?.len());
    info!(
        "Clientes categoría ORO: {}",
        service.list_por_categoria(CategoriaCliente::Oro).await?.len()
    );
    info!(
        "Clientes activos: {}",
        service.list_por_estado(EstadoCliente::Activo).await?.len()
    );

    let actualizado = service
        .update(
            creado.id(),
            UpdateCliente {
                telefono: Some("+57-320-7777777".to_string()),
                categoria: Some(CategoriaCliente::Plata),
                estado: Some(EstadoCliente::Activo),
                ..Default::default()
            },
        )
        .await?;
    match actualizado.data() {
        Some(c) => info!("Cliente actualizado: {} - Categoría: {}", c.nombre_completo(), c.categoria()),
        None => warn!("Error: {}", actualizado.error().unwrap_or_default()),
    }

    let ascendido = service.ascender_categoria(creado.id()).await?;
    if let Some(c) = ascendido.data() {
        info!("Cliente ascendido a {}", c.categoria());
    }

    let eliminado = service.delete(creado.id()).await?;
    info!("Cliente eliminado: {}", eliminado);
    Ok(())
}

async fn emprendedores(directory: &Directory) -> AppResult<()> {
    let service = &directory.emprendedores;
    info!("== Emprendedores ==");

    let creado = service
        .create(CreateEmprendedor {
            nombre: "Andrés".to_string(),
            apellido: "Vásquez".to_string(),
            email: "andres.vasquez@startup.com".to_string(),
            telefono: "+57-318-5555555".to_string(),
            especialidad: "Marketing Digital y E-commerce".to_string(),
            biografia: "Especialista en marketing digital con 6 años de experiencia ayudando a \
                        pequeñas empresas a crecer en línea. Experto en SEO, SEM, redes sociales y \
                        estrategias de e-commerce."
                .to_string(),
            sector: SectorEmprendimiento::Servicios,
            experiencia: NivelExperiencia::Avanzado,
            usuario_id: None,
            redes_sociales: vec![
                RedSocialInput {
                    plataforma: PlataformaRedSocial::Linkedin,
                    url: "https://linkedin.com/in/andres-vasquez-marketing".to_string(),
                    nombre_usuario: "andres-vasquez-marketing".to_string(),
                },
                RedSocialInput {
                    plataforma: PlataformaRedSocial::Instagram,
                    url: "https://instagram.com/andres_marketing_digital".to_string(),
                    nombre_usuario: "andres_marketing_digital".to_string(),
                },
            ],
        })
        .await?;
    info!(
        "Emprendedor creado: {} - {} ({} redes sociales)",
        creado.nombre_completo(),
        creado.sector(),
        creado.redes_sociales().len()
    );

    info!("Emprendedores encontrados: {}", service.list().await?.len());
    info!("Emprendedores verificados: {}", service.list_verificados().await?.len());
    info!(
        "Emprendedores de tecnología: {}",
        service
            .list_por_sector(SectorEmprendimiento::Tecnologia)
            .await?
            .len()
    );
    for (i, e) in service.list_mejor_puntuados(Some(3)).await?.iter().enumerate() {
        info!("Top {}: {} ({}/5)", i + 1, e.nombre_completo(), e.puntuacion());
    }

    let actualizado = service
        .update(
            creado.id(),
            UpdateEmprendedor {
                experiencia: Some(NivelExperiencia::Experto),
                estado: Some(EstadoEmprendedor::Activo),
                ..Default::default()
            },
        )
        .await?;
    match actualizado.data() {
        Some(e) => info!(
            "Emprendedor actualizado: {} - Experiencia: {}",
            e.nombre_completo(),
            e.experiencia()
        ),
        None => warn!("Error: {}", actualizado.error().unwrap_or_default()),
    }

    let verificado = service.verificar(creado.id()).await?;
    match verificado.data() {
        Some(e) => info!(
            "Verificado: {} ({})",
            e.nombre_completo(),
            e.estado()
        ),
        None => warn!("Error: {}", verificado.error().unwrap_or_default()),
    }

    let puntuado = service.actualizar_puntuacion(creado.id(), 4.6).await?;
    match puntuado.data() {
        Some(e) => info!("Nueva puntuación: {}/5", e.puntuacion()),
        None => warn!("Error: {}", puntuado.error().unwrap_or_default()),
    }

    let eliminado = service.delete(creado.id()).await?;
    info!("Emprendedor eliminado: {}", eliminado);
    Ok(())
}
