//! # 体系配置
//!
//! 从 TOML 文件读取方法、基组、催化剂与反应物名称，以及提交参数。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `inputs/` 使用
//! - 使用 `serde` + `toml` 反序列化

use crate::error::{A3edaError, Result};

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 提交命令参数
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct SubmitConfig {
    /// 提交命令（在 PATH 中查找）
    pub command: String,
    /// 每个作业的核数
    pub cores: u32,
    /// 时间限制
    pub time: String,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        SubmitConfig {
            command: "qqchem".to_string(),
            cores: 16,
            time: "4-00:00:00".to_string(),
        }
    }
}

/// 体系配置
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    pub methods: Vec<String>,
    pub bases: Vec<String>,
    pub catalysts: Vec<String>,
    pub reactant1: String,
    pub reactant2: String,
    #[serde(default)]
    pub submit: SubmitConfig,
}

impl SystemConfig {
    /// 从文件加载并校验
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(A3edaError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let text = fs::read_to_string(path).map_err(|e| A3edaError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_toml(&text, path)?;
        debug!("Loaded configuration from '{}': {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        let config: SystemConfig = toml::from_str(text).map_err(|e| A3edaError::ConfigParse {
            path: path.display().to_string(),
            source: e,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |reason: &str| A3edaError::ConfigError {
            path: path.display().to_string(),
            reason: reason.to_string(),
        };

        for (field, values) in [
            ("methods", &self.methods),
            ("bases", &self.bases),
            ("catalysts", &self.catalysts),
        ] {
            if values.is_empty() || values.iter().any(|v| v.trim().is_empty()) {
                return Err(invalid(&format!("'{}' must list at least one non-empty name", field)));
            }
        }
        if self.reactant1.trim().is_empty() {
            return Err(invalid("'reactant1' must not be empty"));
        }
        if self.reactant2.trim().is_empty() {
            return Err(invalid("'reactant2' must not be empty"));
        }
        if self.submit.cores == 0 {
            return Err(invalid("'submit.cores' must be positive"));
        }
        Ok(())
    }

    /// 方法_基组 组合（原始名称）
    pub fn method_basis_pairs(&self) -> Vec<(String, String)> {
        self.methods
            .iter()
            .flat_map(|m| self.bases.iter().map(move |b| (m.clone(), b.clone())))
            .collect()
    }
}

/// 把名称中的特殊字符转义为可用作路径的片段
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        let replacement = match ch {
            ' ' => "-space-",
            '(' | ')' => "-paren-",
            '[' | ']' => "-bracket-",
            '{' | '}' => "-brace-",
            ',' => "-comma-",
            ';' => "-semicolon-",
            '*' => "-asterisk-",
            '?' => "-qmark-",
            '&' => "-and-",
            '|' => "-pipe-",
            '<' => "-lt-",
            '>' => "-gt-",
            '"' => "-dq-",
            '\'' => "-sq-",
            '\\' => "-backslash-",
            ':' => "-colon-",
            '$' => "-dollar-",
            '~' => "-tilde-",
            '!' => "-exclamation-",
            '=' => "-equal-",
            '\t' => "-tab-",
            '\n' => "-newline-",
            _ => {
                out.push(ch);
                continue;
            }
        };
        out.push_str(replacement);
    }
    out
}
