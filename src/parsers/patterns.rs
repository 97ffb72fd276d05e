//! # Q-Chem 输出模式注册表
//!
//! 固定的一组命名提取规则：主模式、可选备用模式、结果形状。
//! 每个模式都取文本中的第一次出现。
//!
//! ## 依赖关系
//! - 被 `parsers/qchem_out.rs` 使用
//! - 使用 `regex` crate

use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::debug;

/// 匹配结果的形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// 单个浮点数，单位隐含（能量：Hartree）
    Float,
    /// 浮点数 + 日志中打印的单位
    FloatWithUnit,
    /// 两个浮点数（温度、压力）
    FloatPair,
    /// 单个整数计数
    Integer,
    /// 两个整数（alpha, omega）
    IntegerPair,
    /// 匹配到的原文
    Text,
}

/// 一次匹配的取值
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Float(f64),
    FloatWithUnit(f64, String),
    FloatPair(f64, f64),
    Integer(i64),
    IntegerPair(i64, i64),
    Text(String),
}

/// 命名提取规则
#[derive(Debug)]
pub struct PatternRule {
    pub name: &'static str,
    pub primary: Regex,
    pub fallback: Option<Regex>,
    pub shape: ValueShape,
}

impl PatternRule {
    fn new(name: &'static str, primary: &str, fallback: Option<&str>, shape: ValueShape) -> Self {
        PatternRule {
            name,
            primary: Regex::new(primary).expect("built-in pattern must compile"),
            fallback: fallback.map(|p| Regex::new(p).expect("built-in pattern must compile")),
            shape,
        }
    }

    /// 先试主模式，再试备用模式；返回值与是否使用了备用模式
    pub fn find(&self, content: &str) -> Option<(Extracted, bool)> {
        if let Some(value) = self
            .primary
            .captures(content)
            .and_then(|caps| convert(&caps, self.shape))
        {
            return Some((value, false));
        }
        let value = self
            .fallback
            .as_ref()
            .and_then(|re| re.captures(content))
            .and_then(|caps| convert(&caps, self.shape))?;
        debug!("Pattern '{}' matched via fallback", self.name);
        Some((value, true))
    }
}

fn convert(caps: &Captures, shape: ValueShape) -> Option<Extracted> {
    let group = |i: usize| caps.get(i).map(|m| m.as_str());
    let float = |i: usize| group(i)?.parse::<f64>().ok();
    let int = |i: usize| group(i)?.parse::<i64>().ok();

    match shape {
        ValueShape::Float => Some(Extracted::Float(float(1)?)),
        ValueShape::FloatWithUnit => Some(Extracted::FloatWithUnit(
            float(1)?,
            group(2)?.to_string(),
        )),
        ValueShape::FloatPair => Some(Extracted::FloatPair(float(1)?, float(2)?)),
        ValueShape::Integer => Some(Extracted::Integer(int(1)?)),
        ValueShape::IntegerPair => Some(Extracted::IntegerPair(int(1)?, int(2)?)),
        ValueShape::Text => Some(Extracted::Text(group(1)?.to_string())),
    }
}

/// 全部提取规则
#[derive(Debug)]
pub struct PatternRegistry {
    pub energy: PatternRule,
    pub enthalpy: PatternRule,
    pub entropy: PatternRule,
    pub optimization_status: PatternRule,
    pub thermodynamics: PatternRule,
    pub imaginary_frequencies: PatternRule,
    pub zero_point_energy: PatternRule,
    pub qrrho_parameters: PatternRule,
}

const NUM: &str = r"([-+]?\d+\.\d+)";

impl PatternRegistry {
    fn build() -> Self {
        PatternRegistry {
            energy: PatternRule::new(
                "final_energy",
                &format!(r"Final energy is\s+{NUM}"),
                Some(&format!(r"Total energy =\s+{NUM}")),
                ValueShape::Float,
            ),
            enthalpy: PatternRule::new(
                "total_enthalpy",
                &format!(r"QRRHO-Total Enthalpy:\s+{NUM}\s+(\S+)"),
                Some(&format!(r"Total Enthalpy:\s+{NUM}\s+(\S+)")),
                ValueShape::FloatWithUnit,
            ),
            entropy: PatternRule::new(
                "total_entropy",
                &format!(r"QRRHO-Total Entropy:\s+{NUM}\s+(\S+)"),
                Some(&format!(r"Total Entropy:\s+{NUM}\s+(\S+)")),
                ValueShape::FloatWithUnit,
            ),
            optimization_status: PatternRule::new(
                "optimization_status",
                r"(OPTIMIZATION CONVERGED|TRANSITION STATE CONVERGED)",
                None,
                ValueShape::Text,
            ),
            thermodynamics: PatternRule::new(
                "thermodynamics",
                &format!(r"STANDARD THERMODYNAMIC QUANTITIES AT\s+{NUM}\s*K\s+AND\s+{NUM}\s*ATM"),
                None,
                ValueShape::FloatPair,
            ),
            imaginary_frequencies: PatternRule::new(
                "imaginary_frequencies",
                r"This Molecule has\s+(\d+)\s+Imaginary Frequencies",
                None,
                ValueShape::Integer,
            ),
            zero_point_energy: PatternRule::new(
                "zero_point_energy",
                &format!(r"Zero point vibrational energy:\s+{NUM}\s+(\S+)"),
                None,
                ValueShape::FloatWithUnit,
            ),
            qrrho_parameters: PatternRule::new(
                "qrrho_parameters",
                r"Quasi-RRHO corrections using alpha\s*=\s*(\d+),\s*and omega\s*=\s*(\d+)\s*cm\^-1",
                None,
                ValueShape::IntegerPair,
            ),
        }
    }
}

/// 获取全局注册表（首次调用时编译）
pub fn registry() -> &'static PatternRegistry {
    static REGISTRY: OnceLock<PatternRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PatternRegistry::build)
}
