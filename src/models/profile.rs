//! # 能量剖面数据模型
//!
//! 标签分类（结构路径 + 反应阶段）、剖面输入行、组合配方和组合结果。
//!
//! ## 依赖关系
//! - 被 `profiles/label.rs`, `profiles/composer.rs` 使用
//! - 被 `profiles/export.rs` 导出

use serde::Serialize;

/// 结构路径：计算属于哪一条反应路径
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathKind {
    NoCatalyst,
    Reactant1(String),
    Reactant2(String),
    Catalyst(String),
    /// 冻结催化剂 (frz_cat)
    Frozen,
    /// 极化催化剂 (pol_cat)
    Polarized,
    /// 完全弛豫催化剂 (full_cat)
    Full,
    Unknown,
}

impl std::fmt::Display for PathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathKind::NoCatalyst => write!(f, "nocat"),
            PathKind::Reactant1(name) | PathKind::Reactant2(name) | PathKind::Catalyst(name) => {
                write!(f, "{}", name)
            }
            PathKind::Frozen => write!(f, "frz"),
            PathKind::Polarized => write!(f, "pol"),
            PathKind::Full => write!(f, "full"),
            PathKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// 反应阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Reactants,
    TransitionState,
    Product,
    Unknown,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Reactants => write!(f, "Reactants"),
            Stage::TransitionState => write!(f, "TS"),
            Stage::Product => write!(f, "Product"),
            Stage::Unknown => write!(f, "Unknown"),
        }
    }
}

/// 标签分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStage {
    pub path: PathKind,
    pub stage: Stage,
}

impl PathStage {
    /// 任一侧未知的分类不参与组合
    pub fn is_known(&self) -> bool {
        self.path != PathKind::Unknown && self.stage != Stage::Unknown
    }
}

/// 剖面输入行（原始剖面表的一行）
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    pub label: String,
    pub path: PathKind,
    pub stage: Stage,
    /// E (kcal/mol)
    pub energy: f64,
    /// G (kcal/mol)，缺少热化学数据时为空
    pub free_energy: Option<f64>,
}

/// 组合配方：名称 + 需要相加的 (路径, 阶段) 组分
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub components: Vec<(PathKind, Stage)>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, components: Vec<(PathKind, Stage)>) -> Self {
        Recipe {
            name: name.into(),
            components,
        }
    }
}

/// 组合剖面条目，序列化为组合剖面表的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeProfile {
    #[serde(rename = "Structure")]
    pub name: String,
    #[serde(rename = "E (kcal/mol)")]
    pub energy: f64,
    #[serde(rename = "G (kcal/mol)")]
    pub free_energy: f64,
}
