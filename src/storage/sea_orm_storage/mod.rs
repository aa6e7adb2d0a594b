//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod archivos;
mod comisiones;
mod cursadas;
mod enrollment;
mod entregas;
mod evaluaciones;
mod materias;
mod notificaciones;
mod preload;
mod resultados;
mod tps;
mod usuarios;

use crate::config::AppConfig;
use crate::errors::{Result, TrackError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::with_migrations(db).await.inspect(|_| {
            info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        })
    }

    /// 运行迁移并包装连接
    async fn with_migrations(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| TrackError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 内存 SQLite（单连接，测试使用）
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| TrackError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        // 内存库每个连接都是独立数据库，必须限制为单连接
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| TrackError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Self::with_migrations(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TrackError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| TrackError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TrackError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TrackError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    auth::Role,
    comisiones::{
        entities::{Comision, ComisionContext},
        requests::{CreateComisionRequest, UpdateComisionRequest},
    },
    cursadas::{
        entities::Cursada,
        requests::{CreateCursadaRequest, UpdateCursadaRequest},
        responses::CursadaDetailResponse,
    },
    entregas::{
        entities::{Archivo, Entrega},
        requests::{CreateEntregaRequest, NewArchivo, UpdateEntregaRequest},
        responses::EntregaDetailResponse,
    },
    evaluaciones::{
        entities::Evaluacion,
        requests::{CreateEvaluacionRequest, UpdateEvaluacionRequest},
        responses::EvaluacionDetailResponse,
    },
    materias::{
        entities::Materia,
        requests::{CreateMateriaRequest, UpdateMateriaRequest},
    },
    notificaciones::{
        entities::{NewNotificacion, Notificacion},
        requests::UpdateNotificacionRequest,
        responses::NotificacionDetailResponse,
    },
    resultados::{
        entities::ResultadoEvaluacion,
        requests::{CreateResultadoRequest, UpdateResultadoRequest},
        responses::ResultadoDetailResponse,
    },
    tps::{
        entities::Tp,
        requests::{CreateTpRequest, UpdateTpRequest},
        responses::TpDetailResponse,
    },
    usuarios::{
        entities::Usuario,
        requests::{CreateUsuarioRequest, UpdateUsuarioRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_usuario(&self, role: Role, req: CreateUsuarioRequest) -> Result<Usuario> {
        self.create_usuario_impl(role, req).await
    }

    async fn get_usuario_by_id(&self, role: Role, id: i64) -> Result<Option<Usuario>> {
        self.get_usuario_by_id_impl(role, id).await
    }

    async fn list_usuarios(&self, role: Role) -> Result<Vec<Usuario>> {
        self.list_usuarios_impl(role).await
    }

    async fn update_usuario(
        &self,
        role: Role,
        id: i64,
        update: UpdateUsuarioRequest,
    ) -> Result<Option<Usuario>> {
        self.update_usuario_impl(role, id, update).await
    }

    async fn delete_usuario(&self, role: Role, id: i64) -> Result<bool> {
        self.delete_usuario_impl(role, id).await
    }

    async fn find_usuario_by_email(&self, email: &str) -> Result<Option<Usuario>> {
        self.find_usuario_by_email_impl(email).await
    }

    async fn email_in_use(&self, email: &str, exclude: Option<(Role, i64)>) -> Result<bool> {
        self.email_in_use_impl(email, exclude).await
    }

    async fn legajo_in_use(&self, legajo: &str, exclude: Option<(Role, i64)>) -> Result<bool> {
        self.legajo_in_use_impl(legajo, exclude).await
    }

    async fn count_usuarios(&self, role: Role) -> Result<u64> {
        self.count_usuarios_impl(role).await
    }

    // 课程模块
    async fn create_materia(&self, req: CreateMateriaRequest) -> Result<Materia> {
        self.create_materia_impl(req).await
    }

    async fn get_materia_by_id(&self, id: i64) -> Result<Option<Materia>> {
        self.get_materia_by_id_impl(id).await
    }

    async fn list_materias(&self) -> Result<Vec<Materia>> {
        self.list_materias_impl().await
    }

    async fn update_materia(
        &self,
        id: i64,
        update: UpdateMateriaRequest,
    ) -> Result<Option<Materia>> {
        self.update_materia_impl(id, update).await
    }

    async fn delete_materia(&self, id: i64) -> Result<bool> {
        self.delete_materia_impl(id).await
    }

    // 分组模块
    async fn create_comision(&self, req: CreateComisionRequest) -> Result<Comision> {
        self.create_comision_impl(req).await
    }

    async fn get_comision_by_id(&self, id: i64) -> Result<Option<Comision>> {
        self.get_comision_by_id_impl(id).await
    }

    async fn list_comisiones(&self) -> Result<Vec<Comision>> {
        self.list_comisiones_impl(None).await
    }

    async fn list_comisiones_by_materia(&self, materia_id: i64) -> Result<Vec<Comision>> {
        self.list_comisiones_impl(Some(materia_id)).await
    }

    async fn update_comision(
        &self,
        id: i64,
        update: UpdateComisionRequest,
    ) -> Result<Option<Comision>> {
        self.update_comision_impl(id, update).await
    }

    async fn delete_comision(&self, id: i64) -> Result<bool> {
        self.delete_comision_impl(id).await
    }

    async fn get_comision_context(&self, comision_id: i64) -> Result<Option<ComisionContext>> {
        self.get_comision_context_impl(comision_id).await
    }

    // 选课模块
    async fn create_cursada(&self, req: CreateCursadaRequest) -> Result<Cursada> {
        self.create_cursada_impl(req).await
    }

    async fn get_cursada_by_id(&self, id: i64) -> Result<Option<Cursada>> {
        self.get_cursada_by_id_impl(id).await
    }

    async fn list_cursadas(&self) -> Result<Vec<Cursada>> {
        self.list_cursadas_impl(None).await
    }

    async fn list_cursadas_by_alumno(&self, alumno_id: i64) -> Result<Vec<Cursada>> {
        self.list_cursadas_impl(Some(alumno_id)).await
    }

    async fn update_cursada(
        &self,
        id: i64,
        update: UpdateCursadaRequest,
    ) -> Result<Option<Cursada>> {
        self.update_cursada_impl(id, update).await
    }

    async fn delete_cursada(&self, id: i64) -> Result<bool> {
        self.delete_cursada_impl(id).await
    }

    // 选课解析
    async fn list_alumno_ids_by_materia(&self, materia_id: i64) -> Result<Vec<i64>> {
        self.list_alumno_ids_by_materia_impl(materia_id).await
    }

    async fn list_alumno_ids_by_comision(&self, comision_id: i64) -> Result<Vec<i64>> {
        self.list_alumno_ids_by_comision_impl(comision_id).await
    }

    async fn alumno_enrolled_in_comision(
        &self,
        alumno_id: i64,
        comision_id: i64,
    ) -> Result<bool> {
        self.alumno_enrolled_in_comision_impl(alumno_id, comision_id)
            .await
    }

    // TP 模块
    async fn create_tp(&self, req: CreateTpRequest) -> Result<Tp> {
        self.create_tp_impl(req).await
    }

    async fn get_tp_by_id(&self, id: i64) -> Result<Option<Tp>> {
        self.get_tp_by_id_impl(id).await
    }

    async fn list_tps(&self) -> Result<Vec<Tp>> {
        self.list_tps_impl().await
    }

    async fn list_vigentes_tps_by_alumno(&self, alumno_id: i64) -> Result<Vec<Tp>> {
        self.list_vigentes_tps_by_alumno_impl(alumno_id).await
    }

    async fn update_tp(&self, id: i64, update: UpdateTpRequest) -> Result<Option<Tp>> {
        self.update_tp_impl(id, update).await
    }

    async fn delete_tp(&self, id: i64) -> Result<bool> {
        self.delete_tp_impl(id).await
    }

    // 提交模块
    async fn create_entrega(&self, req: CreateEntregaRequest) -> Result<Entrega> {
        self.create_entrega_impl(req).await
    }

    async fn get_entrega_by_id(&self, id: i64) -> Result<Option<Entrega>> {
        self.get_entrega_by_id_impl(id).await
    }

    async fn list_entregas(&self) -> Result<Vec<Entrega>> {
        self.list_entregas_impl(None).await
    }

    async fn list_entregas_by_alumno(&self, alumno_id: i64) -> Result<Vec<Entrega>> {
        self.list_entregas_impl(Some(alumno_id)).await
    }

    async fn get_entrega_by_alumno_and_tp(
        &self,
        alumno_id: i64,
        tp_id: i64,
    ) -> Result<Option<Entrega>> {
        self.get_entrega_by_alumno_and_tp_impl(alumno_id, tp_id)
            .await
    }

    async fn update_entrega(
        &self,
        id: i64,
        update: UpdateEntregaRequest,
    ) -> Result<Option<Entrega>> {
        self.update_entrega_impl(id, update).await
    }

    async fn delete_entrega(&self, id: i64) -> Result<bool> {
        self.delete_entrega_impl(id).await
    }

    // 附件模块
    async fn create_archivo(&self, archivo: NewArchivo) -> Result<Archivo> {
        self.create_archivo_impl(archivo).await
    }

    async fn get_archivo_by_id(&self, id: i64) -> Result<Option<Archivo>> {
        self.get_archivo_by_id_impl(id).await
    }

    async fn list_archivos_by_entrega(&self, entrega_id: i64) -> Result<Vec<Archivo>> {
        self.list_archivos_by_entrega_impl(entrega_id).await
    }

    async fn delete_archivo(&self, id: i64) -> Result<bool> {
        self.delete_archivo_impl(id).await
    }

    // 评估模块
    async fn create_evaluacion(&self, req: CreateEvaluacionRequest) -> Result<Evaluacion> {
        self.create_evaluacion_impl(req).await
    }

    async fn get_evaluacion_by_id(&self, id: i64) -> Result<Option<Evaluacion>> {
        self.get_evaluacion_by_id_impl(id).await
    }

    async fn list_evaluaciones(&self) -> Result<Vec<Evaluacion>> {
        self.list_evaluaciones_impl(None).await
    }

    async fn list_evaluaciones_by_comision(&self, comision_id: i64) -> Result<Vec<Evaluacion>> {
        self.list_evaluaciones_impl(Some(comision_id)).await
    }

    async fn update_evaluacion(
        &self,
        id: i64,
        update: UpdateEvaluacionRequest,
    ) -> Result<Option<Evaluacion>> {
        self.update_evaluacion_impl(id, update).await
    }

    async fn delete_evaluacion(&self, id: i64) -> Result<bool> {
        self.delete_evaluacion_impl(id).await
    }

    // 评估结果模块
    async fn create_resultado(&self, req: CreateResultadoRequest) -> Result<ResultadoEvaluacion> {
        self.create_resultado_impl(req).await
    }

    async fn get_resultado_by_id(&self, id: i64) -> Result<Option<ResultadoEvaluacion>> {
        self.get_resultado_by_id_impl(id).await
    }

    async fn list_resultados(&self) -> Result<Vec<ResultadoEvaluacion>> {
        self.list_resultados_impl(None, None).await
    }

    async fn list_resultados_by_alumno(
        &self,
        alumno_id: i64,
    ) -> Result<Vec<ResultadoEvaluacion>> {
        self.list_resultados_impl(Some(alumno_id), None).await
    }

    async fn list_resultados_by_evaluacion(
        &self,
        evaluacion_id: i64,
    ) -> Result<Vec<ResultadoEvaluacion>> {
        self.list_resultados_impl(None, Some(evaluacion_id)).await
    }

    async fn update_resultado(
        &self,
        id: i64,
        update: UpdateResultadoRequest,
    ) -> Result<Option<ResultadoEvaluacion>> {
        self.update_resultado_impl(id, update).await
    }

    async fn delete_resultado(&self, id: i64) -> Result<bool> {
        self.delete_resultado_impl(id).await
    }

    // 通知模块
    async fn create_notificacion(&self, notificacion: NewNotificacion) -> Result<Notificacion> {
        self.create_notificacion_impl(notificacion).await
    }

    async fn create_notificaciones(&self, notificaciones: Vec<NewNotificacion>) -> Result<u64> {
        self.create_notificaciones_impl(notificaciones).await
    }

    async fn get_notificacion_by_id(&self, id: i64) -> Result<Option<Notificacion>> {
        self.get_notificacion_by_id_impl(id).await
    }

    async fn list_notificaciones(&self) -> Result<Vec<Notificacion>> {
        self.list_notificaciones_impl().await
    }

    async fn list_notificaciones_by_alumno(
        &self,
        alumno_id: i64,
        leida: Option<bool>,
    ) -> Result<Vec<Notificacion>> {
        self.list_notificaciones_by_alumno_impl(alumno_id, leida)
            .await
    }

    async fn update_notificacion(
        &self,
        id: i64,
        update: UpdateNotificacionRequest,
    ) -> Result<Option<Notificacion>> {
        self.update_notificacion_impl(id, update).await
    }

    async fn mark_notificacion_read(&self, id: i64) -> Result<bool> {
        self.mark_notificacion_read_impl(id).await
    }

    async fn mark_all_notificaciones_read(&self, alumno_id: i64) -> Result<u64> {
        self.mark_all_notificaciones_read_impl(alumno_id).await
    }

    async fn delete_notificacion(&self, id: i64) -> Result<bool> {
        self.delete_notificacion_impl(id).await
    }

    async fn load_cursada_details(
        &self,
        cursadas: Vec<Cursada>,
    ) -> Result<Vec<CursadaDetailResponse>> {
        self.load_cursada_details_impl(cursadas).await
    }

    async fn load_tp_details(&self, tps: Vec<Tp>) -> Result<Vec<TpDetailResponse>> {
        self.load_tp_details_impl(tps).await
    }

    async fn load_entrega_details(
        &self,
        entregas: Vec<Entrega>,
    ) -> Result<Vec<EntregaDetailResponse>> {
        self.load_entrega_details_impl(entregas).await
    }

    async fn load_evaluacion_details(
        &self,
        evaluaciones: Vec<Evaluacion>,
    ) -> Result<Vec<EvaluacionDetailResponse>> {
        self.load_evaluacion_details_impl(evaluaciones).await
    }

    async fn load_resultado_details(
        &self,
        resultados: Vec<ResultadoEvaluacion>,
    ) -> Result<Vec<ResultadoDetailResponse>> {
        self.load_resultado_details_impl(resultados).await
    }

    async fn load_notificacion_details(
        &self,
        notificaciones: Vec<Notificacion>,
    ) -> Result<Vec<NotificacionDetailResponse>> {
        self.load_notificacion_details_impl(notificaciones).await
    }
}
