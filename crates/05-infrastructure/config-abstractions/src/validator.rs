//! 配置节验证

use infrastructure_common::{ConfigSection, ValidationError};
use serde_json::Value;
use std::collections::BTreeMap;

/// 验证结果
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// 是否验证通过
    pub is_valid: bool,
    /// 验证错误列表
    pub errors: Vec<ValidationError>,
    /// 验证警告列表
    pub warnings: Vec<ValidationWarning>,
    /// 验证的配置项数量
    pub validated_count: usize,
    /// 验证时间
    pub validated_at: chrono::DateTime<chrono::Utc>,
}

impl ValidationResult {
    /// 创建成功的验证结果
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            validated_count: 0,
            validated_at: chrono::Utc::now(),
        }
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.is_valid = false;
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 错误描述列表
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// 验证警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// 警告字段
    pub field: String,
    /// 警告消息
    pub message: String,
}

impl ValidationWarning {
    /// 创建新的验证警告
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 值类型约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Object,
}

impl ValueKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
        }
    }
}

/// 验证规则
#[derive(Debug, Clone, Default)]
pub struct ValidationRule {
    /// 是否必需
    pub required: bool,
    /// 值类型
    pub kind: Option<ValueKind>,
    /// 字符串最小长度
    pub min_length: Option<usize>,
}

impl ValidationRule {
    /// 创建新的验证规则
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置为必需字段
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// 设置值类型
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// 设置字符串最小长度
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// 验证值
    pub fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        if let Some(kind) = self.kind {
            if !kind.matches(value) {
                return Err(ValidationError::invalid_field_value(
                    field,
                    value.to_string(),
                    format!("期望类型: {}", kind.as_str()),
                ));
            }
        }

        if let (Some(min_len), Some(text)) = (self.min_length, value.as_str()) {
            if text.trim().len() < min_len {
                return Err(ValidationError::invalid_field_value(
                    field,
                    text,
                    format!("长度不能小于 {}", min_len),
                ));
            }
        }

        Ok(())
    }
}

/// 通用配置节验证器
///
/// 字段名按 ASCII 忽略大小写匹配
#[derive(Debug, Clone)]
pub struct GenericConfigValidator {
    name: String,
    rules: BTreeMap<String, ValidationRule>,
}

impl GenericConfigValidator {
    /// 创建新的通用验证器
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: BTreeMap::new(),
        }
    }

    /// 添加验证规则
    pub fn with_rule(mut self, field: impl Into<String>, rule: ValidationRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    /// 获取验证器名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 验证配置节，未声明的字段记为警告
    pub fn validate_section(&self, section: &ConfigSection) -> ValidationResult {
        let mut result = ValidationResult::success();

        for (field, rule) in &self.rules {
            match section.get_ignore_case(field) {
                Some(value) => {
                    if let Err(error) = rule.validate(field, value) {
                        result.add_error(error);
                    }
                }
                None if rule.required => {
                    result.add_error(ValidationError::required_field_missing(field));
                }
                None => {}
            }
        }

        for key in section.data.keys() {
            if !self.rules.keys().any(|field| field.eq_ignore_ascii_case(key)) {
                result.add_warning(ValidationWarning::new(key, "未声明的配置项，将被忽略"));
            }
        }

        result.validated_count = self.rules.len();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths_validator() -> GenericConfigValidator {
        GenericConfigValidator::new("data_validation")
            .with_rule(
                "root_dir",
                ValidationRule::new().required().with_kind(ValueKind::String).with_min_length(1),
            )
            .with_rule(
                "STATUS_FILE",
                ValidationRule::new().required().with_kind(ValueKind::String),
            )
            .with_rule("report_file", ValidationRule::new().with_kind(ValueKind::String))
    }

    #[test]
    fn test_valid_section_passes() {
        let mut section = ConfigSection::new();
        section.insert("root_dir", json!("artifacts/data_validation"));
        section.insert("status_file", json!("artifacts/data_validation/status.txt"));

        let result = paths_validator().validate_section(&section);
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty());
        assert_eq!(result.validated_count, 3);
    }

    #[test]
    fn test_every_problem_is_reported() {
        let mut section = ConfigSection::new();
        section.insert("root_dir", json!(""));
        section.insert("report_file", json!(42));
        section.insert("extra", json!(true));

        let result = paths_validator().validate_section(&section);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 3);
        assert!(result
            .errors
            .contains(&ValidationError::required_field_missing("STATUS_FILE")));
        assert_eq!(result.warnings, vec![ValidationWarning::new("extra", "未声明的配置项，将被忽略")]);
    }
}
