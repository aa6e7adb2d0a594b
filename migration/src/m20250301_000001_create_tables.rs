use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 账号表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Admins::Nombre).string().not_null())
                    .col(ColumnDef::new(Admins::Apellido).string().not_null())
                    .col(
                        ColumnDef::new(Admins::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Admins::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Admins::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Profesores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profesores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profesores::Nombre).string().not_null())
                    .col(ColumnDef::new(Profesores::Apellido).string().not_null())
                    .col(
                        ColumnDef::new(Profesores::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Profesores::Legajo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profesores::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Profesores::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Profesores::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alumnos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alumnos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alumnos::Nombre).string().not_null())
                    .col(ColumnDef::new(Alumnos::Apellido).string().not_null())
                    .col(
                        ColumnDef::new(Alumnos::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Alumnos::Legajo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Alumnos::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Alumnos::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Alumnos::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // ==================== 课程与分组 ====================
        manager
            .create_table(
                Table::create()
                    .table(Materias::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Materias::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Materias::Nombre).string().not_null())
                    .col(ColumnDef::new(Materias::Descripcion).text().null())
                    .col(ColumnDef::new(Materias::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Materias::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comisiones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comisiones::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comisiones::Nombre).string().not_null())
                    .col(
                        ColumnDef::new(Comisiones::MateriaId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Comisiones::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Comisiones::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Comisiones::Table, Comisiones::MateriaId)
                            .to(Materias::Table, Materias::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cursadas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cursadas::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cursadas::AlumnoId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Cursadas::ComisionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Cursadas::AnoLectivo).integer().not_null())
                    .col(ColumnDef::new(Cursadas::NotaFinal).double().null())
                    .col(ColumnDef::new(Cursadas::NotaConceptual).double().null())
                    .col(ColumnDef::new(Cursadas::Feedback).text().null())
                    .col(ColumnDef::new(Cursadas::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Cursadas::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cursadas::Table, Cursadas::AlumnoId)
                            .to(Alumnos::Table, Alumnos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cursadas::Table, Cursadas::ComisionId)
                            .to(Comisiones::Table, Comisiones::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 作业（TP）与提交 ====================
        manager
            .create_table(
                Table::create()
                    .table(Tps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tps::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tps::Consigna).text().not_null())
                    .col(ColumnDef::new(Tps::FechaEntrega).big_integer().not_null())
                    .col(
                        ColumnDef::new(Tps::Vigente)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Tps::ComisionId).big_integer().not_null())
                    .col(ColumnDef::new(Tps::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Tps::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tps::Table, Tps::ComisionId)
                            .to(Comisiones::Table, Comisiones::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Entregas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entregas::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entregas::AlumnoId).big_integer().not_null())
                    .col(ColumnDef::new(Entregas::TpId).big_integer().not_null())
                    .col(ColumnDef::new(Entregas::FechaHora).big_integer().not_null())
                    .col(ColumnDef::new(Entregas::Nota).double().null())
                    .col(ColumnDef::new(Entregas::Devolucion).text().null())
                    .col(ColumnDef::new(Entregas::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Entregas::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Entregas::Table, Entregas::AlumnoId)
                            .to(Alumnos::Table, Alumnos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Entregas::Table, Entregas::TpId)
                            .to(Tps::Table, Tps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Archivos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Archivos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Archivos::EntregaId).big_integer().not_null())
                    .col(ColumnDef::new(Archivos::Filename).string().not_null())
                    .col(ColumnDef::new(Archivos::OriginalName).string().not_null())
                    .col(ColumnDef::new(Archivos::FilePath).string().not_null())
                    .col(ColumnDef::new(Archivos::ContentType).string().not_null())
                    .col(ColumnDef::new(Archivos::Size).big_integer().not_null())
                    .col(ColumnDef::new(Archivos::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Archivos::Table, Archivos::EntregaId)
                            .to(Entregas::Table, Entregas::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 评估与结果 ====================
        manager
            .create_table(
                Table::create()
                    .table(Evaluaciones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluaciones::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluaciones::FechaEvaluacion)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluaciones::Temas).text().not_null())
                    .col(ColumnDef::new(Evaluaciones::Observaciones).text().null())
                    .col(
                        ColumnDef::new(Evaluaciones::ComisionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluaciones::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluaciones::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluaciones::Table, Evaluaciones::ComisionId)
                            .to(Comisiones::Table, Comisiones::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ResultadosEvaluacion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResultadosEvaluacion::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResultadosEvaluacion::Nota).double().not_null())
                    .col(ColumnDef::new(ResultadosEvaluacion::Devolucion).text().null())
                    .col(
                        ColumnDef::new(ResultadosEvaluacion::AlumnoId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResultadosEvaluacion::EvaluacionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResultadosEvaluacion::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResultadosEvaluacion::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ResultadosEvaluacion::Table, ResultadosEvaluacion::AlumnoId)
                            .to(Alumnos::Table, Alumnos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                ResultadosEvaluacion::Table,
                                ResultadosEvaluacion::EvaluacionId,
                            )
                            .to(Evaluaciones::Table, Evaluaciones::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 通知 ====================
        manager
            .create_table(
                Table::create()
                    .table(Notificaciones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notificaciones::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notificaciones::AlumnoId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notificaciones::Mensaje).text().not_null())
                    .col(
                        ColumnDef::new(Notificaciones::FechaHora)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notificaciones::Leida)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notificaciones::Table, Notificaciones::AlumnoId)
                            .to(Alumnos::Table, Alumnos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comisiones_materia_id")
                    .table(Comisiones::Table)
                    .col(Comisiones::MateriaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cursadas_comision_id")
                    .table(Cursadas::Table)
                    .col(Cursadas::ComisionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cursadas_alumno_id")
                    .table(Cursadas::Table)
                    .col(Cursadas::AlumnoId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tps_comision_id")
                    .table(Tps::Table)
                    .col(Tps::ComisionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_entregas_alumno_tp")
                    .table(Entregas::Table)
                    .col(Entregas::AlumnoId)
                    .col(Entregas::TpId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_archivos_entrega_id")
                    .table(Archivos::Table)
                    .col(Archivos::EntregaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluaciones_comision_id")
                    .table(Evaluaciones::Table)
                    .col(Evaluaciones::ComisionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_resultados_alumno_id")
                    .table(ResultadosEvaluacion::Table)
                    .col(ResultadosEvaluacion::AlumnoId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notificaciones_alumno_leida")
                    .table(Notificaciones::Table)
                    .col(Notificaciones::AlumnoId)
                    .col(Notificaciones::Leida)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Notificaciones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ResultadosEvaluacion::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluaciones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Archivos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Entregas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cursadas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comisiones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Materias::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alumnos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profesores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Admins {
    #[sea_orm(iden = "admins")]
    Table,
    Id,
    Nombre,
    Apellido,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Profesores {
    #[sea_orm(iden = "profesores")]
    Table,
    Id,
    Nombre,
    Apellido,
    Email,
    Legajo,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Alumnos {
    #[sea_orm(iden = "alumnos")]
    Table,
    Id,
    Nombre,
    Apellido,
    Email,
    Legajo,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Materias {
    #[sea_orm(iden = "materias")]
    Table,
    Id,
    Nombre,
    Descripcion,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Comisiones {
    #[sea_orm(iden = "comisiones")]
    Table,
    Id,
    Nombre,
    MateriaId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Cursadas {
    #[sea_orm(iden = "cursadas")]
    Table,
    Id,
    AlumnoId,
    ComisionId,
    AnoLectivo,
    NotaFinal,
    NotaConceptual,
    Feedback,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tps {
    #[sea_orm(iden = "tps")]
    Table,
    Id,
    Consigna,
    FechaEntrega,
    Vigente,
    ComisionId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Entregas {
    #[sea_orm(iden = "entregas")]
    Table,
    Id,
    AlumnoId,
    TpId,
    FechaHora,
    Nota,
    Devolucion,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Archivos {
    #[sea_orm(iden = "archivos")]
    Table,
    Id,
    EntregaId,
    Filename,
    OriginalName,
    FilePath,
    ContentType,
    Size,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Evaluaciones {
    #[sea_orm(iden = "evaluaciones")]
    Table,
    Id,
    FechaEvaluacion,
    Temas,
    Observaciones,
    ComisionId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ResultadosEvaluacion {
    #[sea_orm(iden = "resultados_evaluacion")]
    Table,
    Id,
    Nota,
    Devolucion,
    AlumnoId,
    EvaluacionId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notificaciones {
    #[sea_orm(iden = "notificaciones")]
    Table,
    Id,
    AlumnoId,
    Mensaje,
    FechaHora,
    Leida,
}
