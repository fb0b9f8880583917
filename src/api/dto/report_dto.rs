use serde::Deserialize;

use crate::error::{AppError, Result};

/// `send-pdf` 查询参数
#[derive(Debug, Deserialize, Default)]
pub struct SendPdfParams {
    pub email: Option<String>,
}

/// 校验通过的报告请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendPdfRequest {
    pub user_id: String,
    pub patient_id: String,
    pub email: String,
}

/// 仅检查是否存在；非空白值原样保留
fn required(value: Option<&str>, message: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(message.to_string())),
    }
}

impl SendPdfRequest {
    /// 依次校验 user_id、patient_id、email，空白值视为缺失
    pub fn validate(user_id: &str, patient_id: &str, email: Option<&str>) -> Result<Self> {
        Ok(Self {
            user_id: required(Some(user_id), "User ID is required")?,
            patient_id: required(Some(patient_id), "Patient ID is required")?,
            email: required(email, "Email is required")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "p1", Some("a@b.com"), "User ID is required")]
    #[case("u1", "", Some("a@b.com"), "Patient ID is required")]
    #[case("u1", "p1", None, "Email is required")]
    #[case("u1", "p1", Some("   "), "Email is required")]
    #[case("", "", None, "User ID is required")]
    fn test_missing_field_rejected(
        #[case] user_id: &str,
        #[case] patient_id: &str,
        #[case] email: Option<&str>,
        #[case] message: &str,
    ) {
        let err = SendPdfRequest::validate(user_id, patient_id, email).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == message));
    }

    #[test]
    fn test_valid_request() {
        let request = SendPdfRequest::validate("u1", "p1", Some("a@b.com")).unwrap();
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.patient_id, "p1");
        assert_eq!(request.email, "a@b.com");
    }

    #[test]
    fn test_present_values_pass_through_unchanged() {
        let request = SendPdfRequest::validate(" u1", "p1 ", Some(" Doctor <a@b.com> ")).unwrap();
        assert_eq!(request.user_id, " u1");
        assert_eq!(request.patient_id, "p1 ");
        assert_eq!(request.email, " Doctor <a@b.com> ");
    }
}
