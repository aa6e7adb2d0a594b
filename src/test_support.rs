//! 测试辅助：内存数据库与基础数据

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use crate::errors::{Result, TrackError};
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
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

/// 已完成迁移的内存存储
pub(crate) async fn storage() -> Arc<dyn Storage> {
    Arc::new(
        SeaOrmStorage::in_memory()
            .await
            .expect("in-memory storage should initialize"),
    )
}

pub(crate) async fn seed_usuario(
    storage: &Arc<dyn Storage>,
    role: Role,
    email: &str,
    legajo: Option<&str>,
) -> Usuario {
    storage
        .create_usuario(
            role,
            CreateUsuarioRequest {
                nombre: "Test".into(),
                apellido: "Usuario".into(),
                email: email.into(),
                legajo: legajo.map(Into::into),
                password: "not-a-real-hash".into(),
            },
        )
        .await
        .expect("seed usuario")
}

pub(crate) async fn seed_alumno(storage: &Arc<dyn Storage>, email: &str, legajo: &str) -> Usuario {
    seed_usuario(storage, Role::Alumno, email, Some(legajo)).await
}

pub(crate) async fn seed_materia(storage: &Arc<dyn Storage>, nombre: &str) -> Materia {
    storage
        .create_materia(CreateMateriaRequest {
            nombre: nombre.into(),
            descripcion: None,
        })
        .await
        .expect("seed materia")
}

pub(crate) async fn seed_comision(
    storage: &Arc<dyn Storage>,
    materia_id: i64,
    nombre: &str,
) -> Comision {
    storage
        .create_comision(CreateComisionRequest {
            nombre: nombre.into(),
            materia_id,
        })
        .await
        .expect("seed comision")
}

pub(crate) async fn enroll(
    storage: &Arc<dyn Storage>,
    alumno_id: i64,
    comision_id: i64,
) -> Cursada {
    storage
        .create_cursada(CreateCursadaRequest {
            alumno_id,
            comision_id,
            ano_lectivo: 2025,
            nota_final: None,
            nota_conceptual: None,
            feedback: None,
        })
        .await
        .expect("seed cursada")
}

pub(crate) fn new_notificacion(alumno_id: i64, mensaje: &str) -> NewNotificacion {
    NewNotificacion {
        alumno_id,
        mensaje: mensaje.into(),
        fecha_hora: Utc::now(),
    }
}

/// 某个学生当前的通知数量
pub(crate) async fn notificaciones_de(storage: &Arc<dyn Storage>, alumno_id: i64) -> Vec<String> {
    storage
        .list_notificaciones_by_alumno(alumno_id, None)
        .await
        .expect("list notificaciones")
        .into_iter()
        .map(|n| n.mensaje)
        .collect()
}

/// 通知写入按次数失败的存储，其余操作原样转发给内部存储
pub(crate) struct FailingNotificaciones {
    inner: Arc<dyn Storage>,
    fallos: AtomicUsize,
}

impl FailingNotificaciones {
    /// 前 `fallos` 次通知写入返回错误，之后恢复正常
    pub(crate) fn wrap(inner: Arc<dyn Storage>, fallos: usize) -> Arc<dyn Storage> {
        Arc::new(Self {
            inner,
            fallos: AtomicUsize::new(fallos),
        })
    }

    fn should_fail(&self) -> bool {
        self.fallos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait::async_trait]
impl Storage for FailingNotificaciones {
    async fn create_usuario(&self, role: Role, req: CreateUsuarioRequest) -> Result<Usuario> {
        self.inner.create_usuario(role, req).await
    }

    async fn get_usuario_by_id(&self, role: Role, id: i64) -> Result<Option<Usuario>> {
        self.inner.get_usuario_by_id(role, id).await
    }

    async fn list_usuarios(&self, role: Role) -> Result<Vec<Usuario>> {
        self.inner.list_usuarios(role).await
    }

    async fn update_usuario(
        &self,
        role: Role,
        id: i64,
        update: UpdateUsuarioRequest,
    ) -> Result<Option<Usuario>> {
        self.inner.update_usuario(role, id, update).await
    }

    async fn delete_usuario(&self, role: Role, id: i64) -> Result<bool> {
        self.inner.delete_usuario(role, id).await
    }

    async fn find_usuario_by_email(&self, email: &str) -> Result<Option<Usuario>> {
        self.inner.find_usuario_by_email(email).await
    }

    async fn email_in_use(&self, email: &str, exclude: Option<(Role, i64)>) -> Result<bool> {
        self.inner.email_in_use(email, exclude).await
    }

    async fn legajo_in_use(&self, legajo: &str, exclude: Option<(Role, i64)>) -> Result<bool> {
        self.inner.legajo_in_use(legajo, exclude).await
    }

    async fn count_usuarios(&self, role: Role) -> Result<u64> {
        self.inner.count_usuarios(role).await
    }

    async fn create_materia(&self, req: CreateMateriaRequest) -> Result<Materia> {
        self.inner.create_materia(req).await
    }

    async fn get_materia_by_id(&self, id: i64) -> Result<Option<Materia>> {
        self.inner.get_materia_by_id(id).await
    }

    async fn list_materias(&self) -> Result<Vec<Materia>> {
        self.inner.list_materias().await
    }

    async fn update_materia(
        &self,
        id: i64,
        update: UpdateMateriaRequest,
    ) -> Result<Option<Materia>> {
        self.inner.update_materia(id, update).await
    }

    async fn delete_materia(&self, id: i64) -> Result<bool> {
        self.inner.delete_materia(id).await
    }

    async fn create_comision(&self, req: CreateComisionRequest) -> Result<Comision> {
        self.inner.create_comision(req).await
    }

    async fn get_comision_by_id(&self, id: i64) -> Result<Option<Comision>> {
        self.inner.get_comision_by_id(id).await
    }

    async fn list_comisiones(&self) -> Result<Vec<Comision>> {
        self.inner.list_comisiones().await
    }

    async fn list_comisiones_by_materia(&self, materia_id: i64) -> Result<Vec<Comision>> {
        self.inner.list_comisiones_by_materia(materia_id).await
    }

    async fn update_comision(
        &self,
        id: i64,
        update: UpdateComisionRequest,
    ) -> Result<Option<Comision>> {
        self.inner.update_comision(id, update).await
    }

    async fn delete_comision(&self, id: i64) -> Result<bool> {
        self.inner.delete_comision(id).await
    }

    async fn get_comision_context(&self, comision_id: i64) -> Result<Option<ComisionContext>> {
        self.inner.get_comision_context(comision_id).await
    }

    async fn create_cursada(&self, req: CreateCursadaRequest) -> Result<Cursada> {
        self.inner.create_cursada(req).await
    }

    async fn get_cursada_by_id(&self, id: i64) -> Result<Option<Cursada>> {
        self.inner.get_cursada_by_id(id).await
    }

    async fn list_cursadas(&self) -> Result<Vec<Cursada>> {
        self.inner.list_cursadas().await
    }

    async fn list_cursadas_by_alumno(&self, alumno_id: i64) -> Result<Vec<Cursada>> {
        self.inner.list_cursadas_by_alumno(alumno_id).await
    }

    async fn update_cursada(
        &self,
        id: i64,
        update: UpdateCursadaRequest,
    ) -> Result<Option<Cursada>> {
        self.inner.update_cursada(id, update).await
    }

    async fn delete_cursada(&self, id: i64) -> Result<bool> {
        self.inner.delete_cursada(id).await
    }

    async fn list_alumno_ids_by_materia(&self, materia_id: i64) -> Result<Vec<i64>> {
        self.inner.list_alumno_ids_by_materia(materia_id).await
    }

    async fn list_alumno_ids_by_comision(&self, comision_id: i64) -> Result<Vec<i64>> {
        self.inner.list_alumno_ids_by_comision(comision_id).await
    }

    async fn alumno_enrolled_in_comision(&self, alumno_id: i64, comision_id: i64) -> Result<bool> {
        self.inner.alumno_enrolled_in_comision(alumno_id, comision_id).await
    }

    async fn create_tp(&self, req: CreateTpRequest) -> Result<Tp> {
        self.inner.create_tp(req).await
    }

    async fn get_tp_by_id(&self, id: i64) -> Result<Option<Tp>> {
        self.inner.get_tp_by_id(id).await
    }

    async fn list_tps(&self) -> Result<Vec<Tp>> {
        self.inner.list_tps().await
    }

    async fn list_vigentes_tps_by_alumno(&self, alumno_id: i64) -> Result<Vec<Tp>> {
        self.inner.list_vigentes_tps_by_alumno(alumno_id).await
    }

    async fn update_tp(&self, id: i64, update: UpdateTpRequest) -> Result<Option<Tp>> {
        self.inner.update_tp(id, update).await
    }

    async fn delete_tp(&self, id: i64) -> Result<bool> {
        self.inner.delete_tp(id).await
    }

    async fn create_entrega(&self, req: CreateEntregaRequest) -> Result<Entrega> {
        self.inner.create_entrega(req).await
    }

    async fn get_entrega_by_id(&self, id: i64) -> Result<Option<Entrega>> {
        self.inner.get_entrega_by_id(id).await
    }

    async fn list_entregas(&self) -> Result<Vec<Entrega>> {
        self.inner.list_entregas().await
    }

    async fn list_entregas_by_alumno(&self, alumno_id: i64) -> Result<Vec<Entrega>> {
        self.inner.list_entregas_by_alumno(alumno_id).await
    }

    async fn get_entrega_by_alumno_and_tp(
        &self,
        alumno_id: i64,
        tp_id: i64,
    ) -> Result<Option<Entrega>> {
        self.inner.get_entrega_by_alumno_and_tp(alumno_id, tp_id).await
    }

    async fn update_entrega(
        &self,
        id: i64,
        update: UpdateEntregaRequest,
    ) -> Result<Option<Entrega>> {
        self.inner.update_entrega(id, update).await
    }

    async fn delete_entrega(&self, id: i64) -> Result<bool> {
        self.inner.delete_entrega(id).await
    }

    async fn create_archivo(&self, archivo: NewArchivo) -> Result<Archivo> {
        self.inner.create_archivo(archivo).await
    }

    async fn get_archivo_by_id(&self, id: i64) -> Result<Option<Archivo>> {
        self.inner.get_archivo_by_id(id).await
    }

    async fn list_archivos_by_entrega(&self, entrega_id: i64) -> Result<Vec<Archivo>> {
        self.inner.list_archivos_by_entrega(entrega_id).await
    }

    async fn delete_archivo(&self, id: i64) -> Result<bool> {
        self.inner.delete_archivo(id).await
    }

    async fn create_evaluacion(&self, req: CreateEvaluacionRequest) -> Result<Evaluacion> {
        self.inner.create_evaluacion(req).await
    }

    async fn get_evaluacion_by_id(&self, id: i64) -> Result<Option<Evaluacion>> {
        self.inner.get_evaluacion_by_id(id).await
    }

    async fn list_evaluaciones(&self) -> Result<Vec<Evaluacion>> {
        self.inner.list_evaluaciones().await
    }

    async fn list_evaluaciones_by_comision(&self, comision_id: i64) -> Result<Vec<Evaluacion>> {
        self.inner.list_evaluaciones_by_comision(comision_id).await
    }

    async fn update_evaluacion(
        &self,
        id: i64,
        update: UpdateEvaluacionRequest,
    ) -> Result<Option<Evaluacion>> {
        self.inner.update_evaluacion(id, update).await
    }

    async fn delete_evaluacion(&self, id: i64) -> Result<bool> {
        self.inner.delete_evaluacion(id).await
    }

    async fn create_resultado(&self, req: CreateResultadoRequest) -> Result<ResultadoEvaluacion> {
        self.inner.create_resultado(req).await
    }

    async fn get_resultado_by_id(&self, id: i64) -> Result<Option<ResultadoEvaluacion>> {
        self.inner.get_resultado_by_id(id).await
    }

    async fn list_resultados(&self) -> Result<Vec<ResultadoEvaluacion>> {
        self.inner.list_resultados().await
    }

    async fn list_resultados_by_alumno(&self, alumno_id: i64) -> Result<Vec<ResultadoEvaluacion>> {
        self.inner.list_resultados_by_alumno(alumno_id).await
    }

    async fn list_resultados_by_evaluacion(
        &self,
        evaluacion_id: i64,
    ) -> Result<Vec<ResultadoEvaluacion>> {
        self.inner.list_resultados_by_evaluacion(evaluacion_id).await
    }

    async fn update_resultado(
        &self,
        id: i64,
        update: UpdateResultadoRequest,
    ) -> Result<Option<ResultadoEvaluacion>> {
        self.inner.update_resultado(id, update).await
    }

    async fn delete_resultado(&self, id: i64) -> Result<bool> {
        self.inner.delete_resultado(id).await
    }

    async fn create_notificacion(&self, notificacion: NewNotificacion) -> Result<Notificacion> {
        if self.should_fail() {
            return Err(TrackError::database_operation("notificaciones no disponibles"));
        }
        self.inner.create_notificacion(notificacion).await
    }

    async fn create_notificaciones(&self, notificaciones: Vec<NewNotificacion>) -> Result<u64> {
        if self.should_fail() {
            return Err(TrackError::database_operation("notificaciones no disponibles"));
        }
        self.inner.create_notificaciones(notificaciones).await
    }

    async fn get_notificacion_by_id(&self, id: i64) -> Result<Option<Notificacion>> {
        self.inner.get_notificacion_by_id(id).await
    }

    async fn list_notificaciones(&self) -> Result<Vec<Notificacion>> {
        self.inner.list_notificaciones().await
    }

    async fn list_notificaciones_by_alumno(
        &self,
        alumno_id: i64,
        leida: Option<bool>,
    ) -> Result<Vec<Notificacion>> {
        self.inner.list_notificaciones_by_alumno(alumno_id, leida).await
    }

    async fn update_notificacion(
        &self,
        id: i64,
        update: UpdateNotificacionRequest,
    ) -> Result<Option<Notificacion>> {
        self.inner.update_notificacion(id, update).await
    }

    async fn mark_notificacion_read(&self, id: i64) -> Result<bool> {
        self.inner.mark_notificacion_read(id).await
    }

    async fn mark_all_notificaciones_read(&self, alumno_id: i64) -> Result<u64> {
        self.inner.mark_all_notificaciones_read(alumno_id).await
    }

    async fn delete_notificacion(&self, id: i64) -> Result<bool> {
        self.inner.delete_notificacion(id).await
    }

    async fn load_cursada_details(
        &self,
        cursadas: Vec<Cursada>,
    ) -> Result<Vec<CursadaDetailResponse>> {
        self.inner.load_cursada_details(cursadas).await
    }

    async fn load_tp_details(&self, tps: Vec<Tp>) -> Result<Vec<TpDetailResponse>> {
        self.inner.load_tp_details(tps).await
    }

    async fn load_entrega_details(
        &self,
        entregas: Vec<Entrega>,
    ) -> Result<Vec<EntregaDetailResponse>> {
        self.inner.load_entrega_details(entregas).await
    }

    async fn load_evaluacion_details(
        &self,
        evaluaciones: Vec<Evaluacion>,
    ) -> Result<Vec<EvaluacionDetailResponse>> {
        self.inner.load_evaluacion_details(evaluaciones).await
    }

    async fn load_resultado_details(
        &self,
        resultados: Vec<ResultadoEvaluacion>,
    ) -> Result<Vec<ResultadoDetailResponse>> {
        self.inner.load_resultado_details(resultados).await
    }

    async fn load_notificacion_details(
        &self,
        notificaciones: Vec<Notificacion>,
    ) -> Result<Vec<NotificacionDetailResponse>> {
        self.inner.load_notificacion_details(notificaciones).await
    }
}
