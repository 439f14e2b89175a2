//! 错误处理模块
//!
//! 定义了 SDK 中使用的所有错误类型和结果类型。

use thiserror::Error;

use crate::logger::Logger;
use serde::{Deserialize, Serialize};

/// SDK 的主要错误类型
#[derive(Error, Debug)]
pub enum XuiError {
    /// JSON 序列化/反序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 无效参数错误
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// 必需字段缺失错误
    #[error("Missing field: {0}")]
    MissingField(String),

    /// 文档状态错误
    #[error("Invalid document state: {0}")]
    InvalidState(String),

    /// 资源未找到错误
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

/// SDK 的结果类型
pub type Result<T> = std::result::Result<T, XuiError>;

/// 错误分类
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 用户输入错误
    UserInput,
    /// 数据处理错误
    DataProcessing,
    /// 配置文档错误
    Document,
    /// 内部错误
    Internal,
}

impl XuiError {
    /// 创建无效参数错误
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        let error = XuiError::InvalidParameter(msg.into());
        error.log_error();
        error
    }

    /// 创建字段缺失错误
    pub fn missing_field<S: Into<String>>(msg: S) -> Self {
        let error = XuiError::MissingField(msg.into());
        error.log_error();
        error
    }

    /// 创建文档状态错误
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        let error = XuiError::InvalidState(msg.into());
        error.log_error();
        error
    }

    /// 创建未找到错误
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        let error = XuiError::NotFound(msg.into());
        error.log_error();
        error
    }

    /// 创建内部错误
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        let error = XuiError::Internal(msg.into());
        error.log_error();
        error
    }

    /// 获取错误分类
    pub fn category(&self) -> ErrorCategory {
        match self {
            XuiError::InvalidParameter(_) | XuiError::MissingField(_) => ErrorCategory::UserInput,
            XuiError::Json(_) => ErrorCategory::DataProcessing,
            XuiError::InvalidState(_) | XuiError::NotFound(_) => ErrorCategory::Document,
            XuiError::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// 获取错误代码
    pub fn code(&self) -> String {
        match self {
            XuiError::Json(_) => "JSON_ERROR".to_string(),
            XuiError::InvalidParameter(_) => "INVALID_PARAMETER".to_string(),
            XuiError::MissingField(_) => "MISSING_FIELD".to_string(),
            XuiError::InvalidState(_) => "INVALID_STATE".to_string(),
            XuiError::NotFound(_) => "NOT_FOUND".to_string(),
            XuiError::Internal(_) => "INTERNAL_ERROR".to_string(),
        }
    }

    /// 记录错误日志
    fn log_error(&self) {
        Logger::error(&format!("[{}] {}", self.code(), self));
    }
}

/// 手动实现Clone trait
impl Clone for XuiError {
    fn clone(&self) -> Self {
        match self {
            XuiError::Json(_) => XuiError::Internal("JSON error".to_string()),
            XuiError::InvalidParameter(s) => XuiError::InvalidParameter(s.clone()),
            XuiError::MissingField(s) => XuiError::MissingField(s.clone()),
            XuiError::InvalidState(s) => XuiError::InvalidState(s.clone()),
            XuiError::NotFound(s) => XuiError::NotFound(s.clone()),
            XuiError::Internal(s) => XuiError::Internal(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let param_err = XuiError::invalid_parameter("test parameter error");
        assert!(matches!(param_err, XuiError::InvalidParameter(_)));

        let field_err = XuiError::missing_field("test field error");
        assert!(matches!(field_err, XuiError::MissingField(_)));
    }

    #[test]
    fn test_error_display() {
        let err = XuiError::invalid_parameter("test error");
        let error_string = format!("{}", err);
        assert!(error_string.contains("Invalid parameter"));
        assert!(error_string.contains("test error"));
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            XuiError::invalid_parameter("x").category(),
            ErrorCategory::UserInput
        );
        assert_eq!(
            XuiError::missing_field("x").category(),
            ErrorCategory::UserInput
        );
        assert_eq!(
            XuiError::invalid_state("x").category(),
            ErrorCategory::Document
        );
        assert_eq!(XuiError::internal("x").category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_error_code() {
        assert_eq!(XuiError::invalid_parameter("x").code(), "INVALID_PARAMETER");
        assert_eq!(XuiError::not_found("x").code(), "NOT_FOUND");
    }

    #[test]
    fn test_error_clone() {
        let err = XuiError::not_found("client a@b.com");
        let cloned = err.clone();
        assert_eq!(cloned.code(), "NOT_FOUND");
    }
}
