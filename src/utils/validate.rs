use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, TrackError};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static LEGAJO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9/-]{1,20}$").expect("Invalid legajo regex"));

/// 评估日期格式
pub const FECHA_EVALUACION_FORMAT: &str = "%Y-%m-%d";

pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(TrackError::validation("el formato del email no es válido"));
    }
    Ok(())
}

pub fn validate_legajo(legajo: &str) -> Result<()> {
    // 学号：字母、数字、斜线或连字符，最长 20
    if !LEGAJO_RE.is_match(legajo) {
        return Err(TrackError::validation("el formato del legajo no es válido"));
    }
    Ok(())
}

/// 密码策略：至少 8 个字符，同时包含字母与数字
pub fn validate_password(password: &str) -> Result<()> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("la contraseña debe tener al menos 8 caracteres");
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        errors.push("la contraseña debe contener al menos una letra");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("la contraseña debe contener al menos un número");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TrackError::validation(errors.join("; ")))
    }
}

/// 必填文本字段不能为空白
pub fn validate_required(campo: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackError::validation(format!("el campo {campo} es obligatorio")));
    }
    Ok(())
}

/// 分数必须在 [0, 10] 之间
pub fn validate_nota(nota: f64) -> Result<()> {
    if !(0.0..=10.0).contains(&nota) {
        return Err(TrackError::validation("la nota debe estar entre 0 y 10"));
    }
    Ok(())
}

/// 评估日期必须是 YYYY-MM-DD
pub fn validate_fecha_evaluacion(fecha: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(fecha, FECHA_EVALUACION_FORMAT).map_err(|_| {
        TrackError::date_parse(format!(
            "fecha de evaluación inválida: '{fecha}', se espera el formato YYYY-MM-DD"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("ana.garcia@frlp.utn.edu.ar").is_ok());
        assert!(validate_email("ana@").is_err());
        assert!(validate_email("sin-arroba.com").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("cursada2025").is_ok());
        let err = validate_password("corta1").unwrap_err();
        assert!(err.message().contains("8 caracteres"));
        assert!(validate_password("solamenteletras").is_err());
    }

    #[test]
    fn test_nota_bounds() {
        assert!(validate_nota(0.0).is_ok());
        assert!(validate_nota(10.0).is_ok());
        assert!(validate_nota(9.5).is_ok());
        let err = validate_nota(10.5).unwrap_err();
        assert_eq!(err.message(), "la nota debe estar entre 0 y 10");
        assert!(validate_nota(-1.0).is_err());
        assert!(validate_nota(f64::NAN).is_err());
    }

    #[test]
    fn test_fecha_evaluacion() {
        assert!(validate_fecha_evaluacion("2025-06-15").is_ok());
        assert!(validate_fecha_evaluacion("15/06/2025").is_err());
        assert!(validate_fecha_evaluacion("2025-02-30").is_err());
    }

    #[test]
    fn test_required_and_legajo() {
        assert!(validate_required("consigna", "  ").is_err());
        assert!(validate_legajo("12345/6").is_ok());
        assert!(validate_legajo("con espacio").is_err());
    }
}
