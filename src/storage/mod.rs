use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法（管理员 / 教师 / 学生分表存储）
    // 创建账号，password 字段须已哈希
    async fn create_usuario(&self, role: Role, req: CreateUsuarioRequest) -> Result<Usuario>;
    // 通过ID获取账号
    async fn get_usuario_by_id(&self, role: Role, id: i64) -> Result<Option<Usuario>>;
    // 列出某一角色的全部账号
    async fn list_usuarios(&self, role: Role) -> Result<Vec<Usuario>>;
    // 更新账号
    async fn update_usuario(
        &self,
        role: Role,
        id: i64,
        update: UpdateUsuarioRequest,
    ) -> Result<Option<Usuario>>;
    // 删除账号
    async fn delete_usuario(&self, role: Role, id: i64) -> Result<bool>;
    // 在三张账号表中按邮箱查找（登录用）
    async fn find_usuario_by_email(&self, email: &str) -> Result<Option<Usuario>>;
    // 邮箱是否已被占用，exclude 为正在更新的账号
    async fn email_in_use(&self, email: &str, exclude: Option<(Role, i64)>) -> Result<bool>;
    // 学号/工号是否已被占用（教师与学生表）
    async fn legajo_in_use(&self, legajo: &str, exclude: Option<(Role, i64)>) -> Result<bool>;
    // 统计某一角色账号数量
    async fn count_usuarios(&self, role: Role) -> Result<u64>;

    /// 课程管理方法
    async fn create_materia(&self, req: CreateMateriaRequest) -> Result<Materia>;
    async fn get_materia_by_id(&self, id: i64) -> Result<Option<Materia>>;
    async fn list_materias(&self) -> Result<Vec<Materia>>;
    async fn update_materia(&self, id: i64, update: UpdateMateriaRequest)
    -> Result<Option<Materia>>;
    async fn delete_materia(&self, id: i64) -> Result<bool>;

    /// 分组管理方法
    async fn create_comision(&self, req: CreateComisionRequest) -> Result<Comision>;
    async fn get_comision_by_id(&self, id: i64) -> Result<Option<Comision>>;
    async fn list_comisiones(&self) -> Result<Vec<Comision>>;
    async fn list_comisiones_by_materia(&self, materia_id: i64) -> Result<Vec<Comision>>;
    async fn update_comision(
        &self,
        id: i64,
        update: UpdateComisionRequest,
    ) -> Result<Option<Comision>>;
    async fn delete_comision(&self, id: i64) -> Result<bool>;
    // 获取分组及其课程名称（通知文案使用）
    async fn get_comision_context(&self, comision_id: i64) -> Result<Option<ComisionContext>>;

    /// 选课管理方法
    async fn create_cursada(&self, req: CreateCursadaRequest) -> Result<Cursada>;
    async fn get_cursada_by_id(&self, id: i64) -> Result<Option<Cursada>>;
    async fn list_cursadas(&self) -> Result<Vec<Cursada>>;
    async fn list_cursadas_by_alumno(&self, alumno_id: i64) -> Result<Vec<Cursada>>;
    async fn update_cursada(&self, id: i64, update: UpdateCursadaRequest)
    -> Result<Option<Cursada>>;
    async fn delete_cursada(&self, id: i64) -> Result<bool>;

    /// 选课解析：课程 / 分组 -> 去重后的学生 ID
    async fn list_alumno_ids_by_materia(&self, materia_id: i64) -> Result<Vec<i64>>;
    async fn list_alumno_ids_by_comision(&self, comision_id: i64) -> Result<Vec<i64>>;
    // 学生是否选修了该分组
    async fn alumno_enrolled_in_comision(&self, alumno_id: i64, comision_id: i64)
    -> Result<bool>;

    /// 作业（TP）管理方法
    async fn create_tp(&self, req: CreateTpRequest) -> Result<Tp>;
    async fn get_tp_by_id(&self, id: i64) -> Result<Option<Tp>>;
    async fn list_tps(&self) -> Result<Vec<Tp>>;
    // 学生所在分组中仍有效的 TP，按截止时间倒序
    async fn list_vigentes_tps_by_alumno(&self, alumno_id: i64) -> Result<Vec<Tp>>;
    async fn update_tp(&self, id: i64, update: UpdateTpRequest) -> Result<Option<Tp>>;
    async fn delete_tp(&self, id: i64) -> Result<bool>;

    /// 提交管理方法
    async fn create_entrega(&self, req: CreateEntregaRequest) -> Result<Entrega>;
    async fn get_entrega_by_id(&self, id: i64) -> Result<Option<Entrega>>;
    async fn list_entregas(&self) -> Result<Vec<Entrega>>;
    async fn list_entregas_by_alumno(&self, alumno_id: i64) -> Result<Vec<Entrega>>;
    async fn get_entrega_by_alumno_and_tp(
        &self,
        alumno_id: i64,
        tp_id: i64,
    ) -> Result<Option<Entrega>>;
    async fn update_entrega(&self, id: i64, update: UpdateEntregaRequest)
    -> Result<Option<Entrega>>;
    async fn delete_entrega(&self, id: i64) -> Result<bool>;

    /// 附件管理方法
    async fn create_archivo(&self, archivo: NewArchivo) -> Result<Archivo>;
    async fn get_archivo_by_id(&self, id: i64) -> Result<Option<Archivo>>;
    async fn list_archivos_by_entrega(&self, entrega_id: i64) -> Result<Vec<Archivo>>;
    async fn delete_archivo(&self, id: i64) -> Result<bool>;

    /// 评估管理方法
    async fn create_evaluacion(&self, req: CreateEvaluacionRequest) -> Result<Evaluacion>;
    async fn get_evaluacion_by_id(&self, id: i64) -> Result<Option<Evaluacion>>;
    async fn list_evaluaciones(&self) -> Result<Vec<Evaluacion>>;
    async fn list_evaluaciones_by_comision(&self, comision_id: i64) -> Result<Vec<Evaluacion>>;
    async fn update_evaluacion(
        &self,
        id: i64,
        update: UpdateEvaluacionRequest,
    ) -> Result<Option<Evaluacion>>;
    async fn delete_evaluacion(&self, id: i64) -> Result<bool>;

    /// 评估结果管理方法
    async fn create_resultado(&self, req: CreateResultadoRequest) -> Result<ResultadoEvaluacion>;
    async fn get_resultado_by_id(&self, id: i64) -> Result<Option<ResultadoEvaluacion>>;
    async fn list_resultados(&self) -> Result<Vec<ResultadoEvaluacion>>;
    async fn list_resultados_by_alumno(&self, alumno_id: i64)
    -> Result<Vec<ResultadoEvaluacion>>;
    async fn list_resultados_by_evaluacion(
        &self,
        evaluacion_id: i64,
    ) -> Result<Vec<ResultadoEvaluacion>>;
    async fn update_resultado(
        &self,
        id: i64,
        update: UpdateResultadoRequest,
    ) -> Result<Option<ResultadoEvaluacion>>;
    async fn delete_resultado(&self, id: i64) -> Result<bool>;

    /// 通知管理方法
    // 单条创建
    async fn create_notificacion(&self, notificacion: NewNotificacion) -> Result<Notificacion>;
    // 批量创建，返回写入条数；空列表直接返回 0
    async fn create_notificaciones(&self, notificaciones: Vec<NewNotificacion>) -> Result<u64>;
    async fn get_notificacion_by_id(&self, id: i64) -> Result<Option<Notificacion>>;
    async fn list_notificaciones(&self) -> Result<Vec<Notificacion>>;
    // 按学生列出，leida 为 None 时不过滤已读状态
    async fn list_notificaciones_by_alumno(
        &self,
        alumno_id: i64,
        leida: Option<bool>,
    ) -> Result<Vec<Notificacion>>;
    async fn update_notificacion(
        &self,
        id: i64,
        update: UpdateNotificacionRequest,
    ) -> Result<Option<Notificacion>>;
    // 标记单条为已读，返回是否发生了写入
    async fn mark_notificacion_read(&self, id: i64) -> Result<bool>;
    // 标记学生全部未读通知为已读，返回更新条数
    async fn mark_all_notificaciones_read(&self, alumno_id: i64) -> Result<u64>;
    async fn delete_notificacion(&self, id: i64) -> Result<bool>;

    /// 关联数据预加载，输出顺序与输入一致
    async fn load_cursada_details(
        &self,
        cursadas: Vec<Cursada>,
    ) -> Result<Vec<CursadaDetailResponse>>;
    async fn load_tp_details(&self, tps: Vec<Tp>) -> Result<Vec<TpDetailResponse>>;
    async fn load_entrega_details(
        &self,
        entregas: Vec<Entrega>,
    ) -> Result<Vec<EntregaDetailResponse>>;
    async fn load_evaluacion_details(
        &self,
        evaluaciones: Vec<Evaluacion>,
    ) -> Result<Vec<EvaluacionDetailResponse>>;
    async fn load_resultado_details(
        &self,
        resultados: Vec<ResultadoEvaluacion>,
    ) -> Result<Vec<ResultadoDetailResponse>>;
    async fn load_notificacion_details(
        &self,
        notificaciones: Vec<Notificacion>,
    ) -> Result<Vec<NotificacionDetailResponse>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
