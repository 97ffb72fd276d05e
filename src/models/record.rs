//! # 计算记录数据模型
//!
//! 每个成功解析的 Q-Chem 输出对应一条 `CalculationRecord`。
//! 字段是开放的名称 → 值映射，值按类型区分（带单位的数值、整数计数、文本），
//! 保持插入顺序以便导出列顺序稳定。
//!
//! ## 依赖关系
//! - 被 `parsers/qchem_out.rs` 生成
//! - 被 `profiles/` 和 `commands/extract.rs` 使用

/// 单个字段的值
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 带单位的浮点数
    Quantity { value: f64, unit: String },
    /// 整数（可带单位，如 omega 的 cm^-1）
    Integer { value: i64, unit: Option<String> },
    /// 文本标记，如优化收敛状态
    Text(String),
}

impl FieldValue {
    pub fn quantity(value: f64, unit: impl Into<String>) -> Self {
        FieldValue::Quantity {
            value,
            unit: unit.into(),
        }
    }

    pub fn unit(&self) -> Option<&str> {
        match self {
            FieldValue::Quantity { unit, .. } => Some(unit),
            FieldValue::Integer { unit, .. } => unit.as_deref(),
            FieldValue::Text(_) => None,
        }
    }

    /// 导出到 CSV 时的单元格文本
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Quantity { value, .. } => value.to_string(),
            FieldValue::Integer { value, .. } => value.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

/// 记录中的一个命名字段
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    /// 列名：有单位时为 `名称 (单位)`
    pub fn column_name(&self) -> String {
        match self.value.unit() {
            Some(unit) => format!("{} ({})", self.name, unit),
            None => self.name.clone(),
        }
    }
}

/// 单个作业的提取结果
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRecord {
    /// 层级标签（相对目录路径，`/` 分隔）
    pub label: String,

    /// 按提取顺序排列的字段
    pub fields: Vec<Field>,

    /// 焓或熵是否使用了备用模式
    pub fallback_used: bool,
}

impl CalculationRecord {
    pub fn new(label: impl Into<String>) -> Self {
        CalculationRecord {
            label: label.into(),
            fields: Vec::new(),
            fallback_used: false,
        }
    }

    /// 写入字段；同列名已存在时覆盖
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let field = Field {
            name: name.into(),
            value,
        };
        let column = field.column_name();
        match self.fields.iter_mut().find(|f| f.column_name() == column) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn get(&self, name: &str, unit: Option<&str>) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.name == name && f.value.unit() == unit)
            .map(|f| &f.value)
    }

    /// 读取指定名称与单位的数值字段
    pub fn quantity(&self, name: &str, unit: &str) -> Option<f64> {
        match self.get(name, Some(unit)) {
            Some(FieldValue::Quantity { value, .. }) => Some(*value),
            _ => None,
        }
    }

    /// 所有列名（按字段顺序）
    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.column_name()).collect()
    }

    /// 按列名取单元格文本
    pub fn cell(&self, column: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|f| f.column_name() == column)
            .map(|f| f.value.to_cell())
    }
}
