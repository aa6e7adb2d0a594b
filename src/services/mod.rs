pub mod archivos;
pub mod auth;
pub mod comisiones;
pub mod cursadas;
pub mod entregas;
pub mod evaluaciones;
pub mod materias;
pub mod notificaciones;
pub mod resultados;
pub mod tps;
pub mod usuarios;

pub use archivos::ArchivoService;
pub use auth::AuthService;
pub use comisiones::ComisionService;
pub use cursadas::CursadaService;
pub use entregas::EntregaService;
pub use evaluaciones::EvaluacionService;
pub use materias::MateriaService;
pub use notificaciones::NotificacionService;
pub use resultados::ResultadoService;
pub use tps::TpService;
pub use usuarios::UsuarioService;

use actix_web::HttpRequest;

use crate::errors::{Result, TrackError};
use crate::middlewares::RequireJWT;
use crate::models::auth::Identity;

/// 从请求中取出 RequireJWT 写入的身份
pub(crate) fn require_identity(request: &HttpRequest) -> Result<Identity> {
    RequireJWT::extract_identity(request)
        .ok_or_else(|| TrackError::authentication("Unauthorized: missing identity"))
}
