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

pub use archivos::configure_archivos_routes;
pub use auth::configure_auth_routes;
pub use comisiones::configure_comisiones_routes;
pub use cursadas::configure_cursadas_routes;
pub use entregas::configure_entregas_routes;
pub use evaluaciones::configure_evaluaciones_routes;
pub use materias::configure_materias_routes;
pub use notificaciones::configure_notificaciones_routes;
pub use resultados::configure_resultados_routes;
pub use tps::configure_tps_routes;
pub use usuarios::configure_usuarios_routes;
