//! 预导入模块，方便使用

pub use super::admins::{ActiveModel as AdminActiveModel, Entity as Admins, Model as AdminModel};
pub use super::alumnos::{
    ActiveModel as AlumnoActiveModel, Entity as Alumnos, Model as AlumnoModel,
};
pub use super::archivos::{
    ActiveModel as ArchivoActiveModel, Entity as Archivos, Model as ArchivoModel,
};
pub use super::comisiones::{
    ActiveModel as ComisionActiveModel, Entity as Comisiones, Model as ComisionModel,
};
pub use super::cursadas::{
    ActiveModel as CursadaActiveModel, Entity as Cursadas, Model as CursadaModel,
};
pub use super::entregas::{
    ActiveModel as EntregaActiveModel, Entity as Entregas, Model as EntregaModel,
};
pub use super::evaluaciones::{
    ActiveModel as EvaluacionActiveModel, Entity as Evaluaciones, Model as EvaluacionModel,
};
pub use super::materias::{
    ActiveModel as MateriaActiveModel, Entity as Materias, Model as MateriaModel,
};
pub use super::notificaciones::{
    ActiveModel as NotificacionActiveModel, Entity as Notificaciones, Model as NotificacionModel,
};
pub use super::profesores::{
    ActiveModel as ProfesorActiveModel, Entity as Profesores, Model as ProfesorModel,
};
pub use super::resultados_evaluacion::{
    ActiveModel as ResultadoActiveModel, Entity as ResultadosEvaluacion, Model as ResultadoModel,
};
pub use super::tps::{ActiveModel as TpActiveModel, Entity as Tps, Model as TpModel};
