//! # Q-Chem 输出记录提取器
//!
//! 从 Q-Chem `.out` 文本中提取能量、热化学校正及辅助字段，
//! 统一单位到 kcal/mol（熵为 kcal/mol.K），并计算派生量 H 与 G。
//!
//! 能量是必需的：找不到能量时整条记录被丢弃。
//! 其余字段缺失时直接省略。
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `parsers/patterns.rs`, `models/record.rs`

use crate::models::{CalculationRecord, FieldValue};
use crate::parsers::patterns::{registry, Extracted};
use tracing::{debug, warn};

/// Hartree → kcal/mol
pub const HARTREE_TO_KCALMOL: f64 = 627.5096080305927;
/// cal → kcal
pub const CAL_TO_KCAL: f64 = 1e-3;

pub const KCAL_MOL: &str = "kcal/mol";
pub const KCAL_MOL_K: &str = "kcal/mol.K";

pub const ENERGY: &str = "E";
pub const ENTHALPY_CORR: &str = "Total Enthalpy Corr.";
pub const ENTROPY_CORR: &str = "Total Entropy Corr.";
pub const ENTHALPY: &str = "H";
pub const FREE_ENERGY: &str = "G";
pub const TEMPERATURE: &str = "Temperature";

/// 焓单位归一化到 kcal/mol
///
/// 未识别的单位按原值保留并标记为 kcal/mol，同时发出警告。
pub fn normalize_enthalpy(value: f64, unit: &str) -> f64 {
    match unit {
        "kcal/mol" => value,
        "Hartree" | "Ha" | "a.u." => value * HARTREE_TO_KCALMOL,
        other => {
            warn!("Unrecognized enthalpy unit: {}. Assuming kcal/mol.", other);
            value
        }
    }
}

/// 熵单位归一化到 kcal/mol.K
pub fn normalize_entropy(value: f64, unit: &str) -> f64 {
    match unit {
        "cal/mol.K" | "cal/mol·K" | "cal/(mol.K)" | "cal/(mol·K)" => value * CAL_TO_KCAL,
        "kcal/mol.K" | "kcal/mol·K" | "kcal/(mol.K)" | "kcal/(mol·K)" => value,
        other => {
            warn!("Unrecognized entropy unit: {}. Assuming kcal/mol.K.", other);
            value
        }
    }
}

/// H = E + 焓校正
pub fn enthalpy(energy_kcal: f64, enthalpy_corr_kcal: f64) -> f64 {
    energy_kcal + enthalpy_corr_kcal
}

/// G = H - T·S
pub fn free_energy(enthalpy_kcal: f64, temperature_k: f64, entropy_corr_kcal_k: f64) -> f64 {
    enthalpy_kcal - temperature_k * entropy_corr_kcal_k
}

/// 从输出文本提取计算记录
///
/// 返回 `None` 当且仅当文本中找不到能量。
pub fn extract(content: &str, label: &str) -> Option<CalculationRecord> {
    let reg = registry();
    let mut record = CalculationRecord::new(label);

    // 能量（无单位，按 Hartree 处理）
    let energy_ha = match reg.energy.find(content) {
        Some((Extracted::Float(v), _)) => v,
        _ => {
            warn!("Final energy value not found for '{}'", label);
            return None;
        }
    };
    let energy_kcal = energy_ha * HARTREE_TO_KCALMOL;
    record.insert(ENERGY, FieldValue::quantity(energy_ha, "Ha"));
    record.insert(ENERGY, FieldValue::quantity(energy_kcal, KCAL_MOL));

    // 焓校正
    let mut enthalpy_corr = None;
    if let Some((Extracted::FloatWithUnit(value, unit), fallback)) = reg.enthalpy.find(content) {
        let converted = normalize_enthalpy(value, &unit);
        record.insert(ENTHALPY_CORR, FieldValue::quantity(converted, KCAL_MOL));
        enthalpy_corr = Some(converted);
        record.fallback_used |= fallback;
    }

    // 熵校正
    let mut entropy_corr = None;
    if let Some((Extracted::FloatWithUnit(value, unit), fallback)) = reg.entropy.find(content) {
        let converted = normalize_entropy(value, &unit);
        record.insert(ENTROPY_CORR, FieldValue::quantity(converted, KCAL_MOL_K));
        entropy_corr = Some(converted);
        record.fallback_used |= fallback;
    }

    // 辅助字段
    if let Some((Extracted::Text(status), _)) = reg.optimization_status.find(content) {
        record.insert("Optimization Status", FieldValue::Text(status));
    }

    let mut temperature = None;
    if let Some((Extracted::FloatPair(t, p), _)) = reg.thermodynamics.find(content) {
        record.insert(TEMPERATURE, FieldValue::quantity(t, "K"));
        record.insert("Pressure", FieldValue::quantity(p, "atm"));
        temperature = Some(t);
    }

    if let Some((Extracted::Integer(n), _)) = reg.imaginary_frequencies.find(content) {
        record.insert(
            "Imaginary Frequencies",
            FieldValue::Integer {
                value: n,
                unit: None,
            },
        );
    }

    if let Some((Extracted::FloatWithUnit(value, unit), _)) = reg.zero_point_energy.find(content)
    {
        record.insert("Zero Point Energy", FieldValue::quantity(value, unit));
    }

    if let Some((Extracted::IntegerPair(alpha, omega), _)) = reg.qrrho_parameters.find(content) {
        record.insert(
            "Alpha",
            FieldValue::Integer {
                value: alpha,
                unit: None,
            },
        );
        record.insert(
            "Omega",
            FieldValue::Integer {
                value: omega,
                unit: Some("cm^-1".to_string()),
            },
        );
    }

    // 派生量：E → H → G
    if let Some(h_corr) = enthalpy_corr {
        let h = enthalpy(energy_kcal, h_corr);
        record.insert(ENTHALPY, FieldValue::quantity(h, KCAL_MOL));

        if let (Some(t), Some(s)) = (temperature, entropy_corr) {
            record.insert(FREE_ENERGY, FieldValue::quantity(free_energy(h, t, s), KCAL_MOL));
        }
    }

    debug!(
        "Extracted {} fields for '{}' (fallback used: {})",
        record.fields.len(),
        label,
        record.fallback_used
    );

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREQ_LOG: &str = r#"
 Welcome to Q-Chem
 Running on node042
 ** OPTIMIZATION CONVERGED **
 Final energy is   -232.250000000000
 This Molecule has  0 Imaginary Frequencies
 Zero point vibrational energy:       60.123 kcal/mol
   STANDARD THERMODYNAMIC QUANTITIES AT   298.15 K  AND     1.00 ATM
 Quasi-RRHO corrections using alpha = 4, and omega = 100 cm^-1
   Total Enthalpy:       65.000 kcal/mol
   Total Entropy:        80.000 cal/mol.K
   QRRHO-Total Enthalpy:       64.500 kcal/mol
   QRRHO-Total Entropy:        78.000 cal/mol.K
 Total job time:  120.50s(wall), 900.10s(cpu)
 *  Thank you very much for using Q-Chem.  Have a nice day.  *
"#;

    #[test]
    fn test_extract_full_frequency_log() {
        let record = extract(FREQ_LOG, "no_cat/product").unwrap();

        assert_eq!(record.quantity("E", "Ha"), Some(-232.25));
        let e_kcal = record.quantity("E", KCAL_MOL).unwrap();
        assert!((e_kcal - (-232.25 * HARTREE_TO_KCALMOL)).abs() < 1e-9);
        assert_eq!(record.quantity(ENTHALPY_CORR, KCAL_MOL), Some(64.5));
        let s = record.quantity(ENTROPY_CORR, KCAL_MOL_K).unwrap();
        assert!((s - 0.078).abs() < 1e-12);
        assert!(!record.fallback_used);

        let h = record.quantity(ENTHALPY, KCAL_MOL).unwrap();
        assert!((h - (e_kcal + 64.5)).abs() < 1e-9);
        let g = record.quantity(FREE_ENERGY, KCAL_MOL).unwrap();
        assert!((g - (h - 298.15 * 0.078)).abs() < 1e-9);

        assert_eq!(
            record.column_names(),
            vec![
                "E (Ha)",
                "E (kcal/mol)",
                "Total Enthalpy Corr. (kcal/mol)",
                "Total Entropy Corr. (kcal/mol.K)",
                "Optimization Status",
                "Temperature (K)",
                "Pressure (atm)",
                "Imaginary Frequencies",
                "Zero Point Energy (kcal/mol)",
                "Alpha",
                "Omega (cm^-1)",
                "H (kcal/mol)",
                "G (kcal/mol)",
            ]
        );
    }

    #[test]
    fn test_missing_energy_discards_record() {
        let content = FREQ_LOG.replace("Final energy is", "Final thing is");
        assert!(extract(&content, "x").is_none());
    }

    #[test]
    fn test_fallback_flag_from_entropy_only() {
        let content = r#"
 Final energy is   -1.000000
   STANDARD THERMODYNAMIC QUANTITIES AT   298.15 K  AND     1.00 ATM
   QRRHO-Total Enthalpy:       10.000 kcal/mol
   Total Entropy:        50.000 cal/mol.K
"#;
        let record = extract(content, "x").unwrap();
        assert!(record.fallback_used);
        assert!(record.quantity(FREE_ENERGY, KCAL_MOL).is_some());
    }

    #[test]
    fn test_energy_fallback_does_not_set_flag() {
        let record = extract(" Total energy = -76.400000\n", "x").unwrap();
        assert_eq!(record.quantity("E", "Ha"), Some(-76.4));
        assert!(!record.fallback_used);
        assert!(record.quantity(ENTHALPY, KCAL_MOL).is_none());
    }

    #[test]
    fn test_no_free_energy_without_temperature() {
        let content = r#"
 Final energy is   -1.000000
   QRRHO-Total Enthalpy:       10.000 kcal/mol
   QRRHO-Total Entropy:        50.000 cal/mol.K
"#;
        let record = extract(content, "x").unwrap();
        assert!(record.quantity(ENTHALPY, KCAL_MOL).is_some());
        assert!(record.quantity(FREE_ENERGY, KCAL_MOL).is_none());
    }

    #[test]
    fn test_hartree_enthalpy_conversion() {
        assert_eq!(normalize_enthalpy(-1.0, "Hartree"), -627.5096080305927);
        assert_eq!(normalize_enthalpy(-1.0, "a.u."), -627.5096080305927);
        assert_eq!(normalize_enthalpy(3.5, "kcal/mol"), 3.5);
    }

    #[test]
    fn test_unrecognized_units_pass_through() {
        assert_eq!(normalize_enthalpy(12.0, "kJ/mol"), 12.0);
        assert_eq!(normalize_entropy(40.0, "J/mol.K"), 40.0);
        assert!((normalize_entropy(40.0, "cal/mol.K") - 0.04).abs() < 1e-15);
        assert_eq!(normalize_entropy(0.04, "kcal/mol.K"), 0.04);
    }

    #[test]
    fn test_free_energy_formula() {
        let g = free_energy(-100.0, 298.15, 0.0500);
        assert!((g - (-114.9075)).abs() < 1e-9);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let a = extract(FREQ_LOG, "lbl").unwrap();
        let b = extract(FREQ_LOG, "lbl").unwrap();
        assert_eq!(a, b);
    }
}
