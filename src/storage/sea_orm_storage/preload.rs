//! 关联数据批量预加载
//!
//! 先收集外键去重，再按 `is_in` 一次性查出关联行并在内存中组装，
//! 列表接口不会按行逐条查询。

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::prelude::{Alumnos, Archivos, Comisiones, Evaluaciones, Materias, Tps};
use crate::entity::{alumnos, archivos, comisiones, evaluaciones, ts_to_datetime, tps};
use crate::errors::{Result, TrackError};
use crate::models::{
    comisiones::entities::ComisionSummary,
    cursadas::{entities::Cursada, responses::CursadaDetailResponse},
    entregas::{
        entities::{Archivo, Entrega},
        responses::EntregaDetailResponse,
    },
    evaluaciones::{
        entities::{Evaluacion, EvaluacionSummary},
        responses::EvaluacionDetailResponse,
    },
    materias::entities::MateriaSummary,
    notificaciones::{entities::Notificacion, responses::NotificacionDetailResponse},
    resultados::{entities::ResultadoEvaluacion, responses::ResultadoDetailResponse},
    tps::{
        entities::{Tp, TpSummary},
        responses::TpDetailResponse,
    },
    usuarios::entities::AlumnoSummary,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

fn unique_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    ids.into_iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

impl SeaOrmStorage {
    async fn alumno_summaries(&self, ids: Vec<i64>) -> Result<HashMap<i64, AlumnoSummary>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Alumnos::find()
            .filter(alumnos::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询学生信息失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|a| {
                (
                    a.id,
                    AlumnoSummary {
                        id: a.id,
                        nombre: a.nombre,
                        apellido: a.apellido,
                        email: a.email,
                        legajo: a.legajo,
                    },
                )
            })
            .collect())
    }

    /// 分组连同所属课程一起加载
    async fn comision_summaries(&self, ids: Vec<i64>) -> Result<HashMap<i64, ComisionSummary>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Comisiones::find()
            .filter(comisiones::Column::Id.is_in(ids))
            .find_also_related(Materias)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询分组信息失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(comision, materia)| {
                (
                    comision.id,
                    ComisionSummary {
                        id: comision.id,
                        nombre: comision.nombre,
                        materia: materia.map(|m| MateriaSummary {
                            id: m.id,
                            nombre: m.nombre,
                        }),
                    },
                )
            })
            .collect())
    }

    async fn tp_summaries(&self, ids: Vec<i64>) -> Result<HashMap<i64, TpSummary>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Tps::find()
            .filter(tps::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询 TP 信息失败: {e}")))?;

        let comisiones = self
            .comision_summaries(rows.iter().map(|tp| tp.comision_id).collect())
            .await?;

        Ok(rows
            .into_iter()
            .map(|tp| {
                (
                    tp.id,
                    TpSummary {
                        id: tp.id,
                        comision: comisiones.get(&tp.comision_id).cloned(),
                        consigna: tp.consigna,
                        fecha_entrega: ts_to_datetime(tp.fecha_entrega),
                        vigente: tp.vigente,
                    },
                )
            })
            .collect())
    }

    async fn evaluacion_summaries(&self, ids: Vec<i64>) -> Result<HashMap<i64, EvaluacionSummary>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Evaluaciones::find()
            .filter(evaluaciones::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询评估信息失败: {e}")))?;

        let comisiones = self
            .comision_summaries(rows.iter().map(|e| e.comision_id).collect())
            .await?;

        Ok(rows
            .into_iter()
            .map(|e| {
                (
                    e.id,
                    EvaluacionSummary {
                        id: e.id,
                        comision: comisiones.get(&e.comision_id).cloned(),
                        fecha_evaluacion: e.fecha_evaluacion,
                        temas: e.temas,
                    },
                )
            })
            .collect())
    }

    async fn archivos_by_entregas(&self, ids: Vec<i64>) -> Result<HashMap<i64, Vec<Archivo>>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Archivos::find()
            .filter(archivos::Column::EntregaId.is_in(ids))
            .order_by_asc(archivos::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TrackError::database_operation(format!("查询附件失败: {e}")))?;

        let mut grouped: HashMap<i64, Vec<Archivo>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.entrega_id)
                .or_default()
                .push(row.into_archivo());
        }
        Ok(grouped)
    }

    /// 选课：学生、分组、课程
    pub async fn load_cursada_details_impl(
        &self,
        cursadas: Vec<Cursada>,
    ) -> Result<Vec<CursadaDetailResponse>> {
        let alumnos = self
            .alumno_summaries(cursadas.iter().map(|c| c.alumno_id).collect())
            .await?;
        let comisiones = self
            .comision_summaries(cursadas.iter().map(|c| c.comision_id).collect())
            .await?;

        Ok(cursadas
            .into_iter()
            .map(|cursada| CursadaDetailResponse {
                alumno: alumnos.get(&cursada.alumno_id).cloned(),
                comision: comisiones.get(&cursada.comision_id).cloned(),
                cursada,
            })
            .collect())
    }

    /// TP：分组、课程
    pub async fn load_tp_details_impl(&self, tps: Vec<Tp>) -> Result<Vec<TpDetailResponse>> {
        let comisiones = self
            .comision_summaries(tps.iter().map(|tp| tp.comision_id).collect())
            .await?;

        Ok(tps
            .into_iter()
            .map(|tp| TpDetailResponse {
                comision: comisiones.get(&tp.comision_id).cloned(),
                tp,
            })
            .collect())
    }

    /// 提交：附件、学生、TP（含分组与课程）
    pub async fn load_entrega_details_impl(
        &self,
        entregas: Vec<Entrega>,
    ) -> Result<Vec<EntregaDetailResponse>> {
        let mut archivos = self
            .archivos_by_entregas(entregas.iter().map(|e| e.id).collect())
            .await?;
        let alumnos = self
            .alumno_summaries(entregas.iter().map(|e| e.alumno_id).collect())
            .await?;
        let tps = self
            .tp_summaries(entregas.iter().map(|e| e.tp_id).collect())
            .await?;

        Ok(entregas
            .into_iter()
            .map(|entrega| EntregaDetailResponse {
                archivos: archivos.remove(&entrega.id).unwrap_or_default(),
                alumno: alumnos.get(&entrega.alumno_id).cloned(),
                tp: tps.get(&entrega.tp_id).cloned(),
                entrega,
            })
            .collect())
    }

    /// 评估：分组、课程
    pub async fn load_evaluacion_details_impl(
        &self,
        evaluaciones: Vec<Evaluacion>,
    ) -> Result<Vec<EvaluacionDetailResponse>> {
        let comisiones = self
            .comision_summaries(evaluaciones.iter().map(|e| e.comision_id).collect())
            .await?;

        Ok(evaluaciones
            .into_iter()
            .map(|evaluacion| EvaluacionDetailResponse {
                comision: comisiones.get(&evaluacion.comision_id).cloned(),
                evaluacion,
            })
            .collect())
    }

    /// 评估结果：学生、评估（含分组与课程）
    pub async fn load_resultado_details_impl(
        &self,
        resultados: Vec<ResultadoEvaluacion>,
    ) -> Result<Vec<ResultadoDetailResponse>> {
        let alumnos = self
            .alumno_summaries(resultados.iter().map(|r| r.alumno_id).collect())
            .await?;
        let evaluaciones = self
            .evaluacion_summaries(resultados.iter().map(|r| r.evaluacion_id).collect())
            .await?;

        Ok(resultados
            .into_iter()
            .map(|resultado| ResultadoDetailResponse {
                alumno: alumnos.get(&resultado.alumno_id).cloned(),
                evaluacion: evaluaciones.get(&resultado.evaluacion_id).cloned(),
                resultado,
            })
            .collect())
    }

    /// 通知：学生
    pub async fn load_notificacion_details_impl(
        &self,
        notificaciones: Vec<Notificacion>,
    ) -> Result<Vec<NotificacionDetailResponse>> {
        let alumnos = self
            .alumno_summaries(notificaciones.iter().map(|n| n.alumno_id).collect())
            .await?;

        Ok(notificaciones
            .into_iter()
            .map(|notificacion| NotificacionDetailResponse {
                alumno: alumnos.get(&notificacion.alumno_id).cloned(),
                notificacion,
            })
            .collect())
    }
}
