//! Verdict produced by the remote validation authority.

use serde::{Deserialize, Serialize};

/// Result of comparing a drawn polygon against a plot's recorded area.
///
/// Produced fresh by every validation call; the session controller retains
/// only the most recent one and nothing here is ever persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    /// The authority's decision: difference within tolerance.
    pub is_valid: bool,
    /// Area of the drawn polygon, hectares.
    pub drawn_area_ha: f64,
    /// Recorded area of the reference plot, hectares.
    pub plot_area_ha: f64,
    /// Percent difference between drawn and recorded area.
    pub difference_percent: f64,
    /// Tolerance the authority applied.
    pub tolerance_percent: f64,
    /// Human-readable explanation, shown to the supervisor on failure.
    pub message: String,
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_the_wire_form() {
        let json = r#"{
            "isValid": false,
            "drawnAreaHa": 1.15,
            "plotAreaHa": 1.0,
            "differencePercent": 15.0,
            "tolerancePercent": 10.0,
            "message": "Drawn area deviates 15.0% from the recorded 1.0 ha"
        }"#;
        let verdict: ValidationVerdict = serde_json::from_str(json).unwrap();
        assert!(!verdict.is_valid);
        assert_eq!(verdict.difference_percent, 15.0);
        assert_eq!(verdict.tolerance_percent, 10.0);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let verdict = ValidationVerdict {
            is_valid: true,
            drawn_area_ha: 0.98,
            plot_area_ha: 1.0,
            difference_percent: 2.0,
            tolerance_percent: 10.0,
            message: "ok".to_string(),
        };
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["isValid"], true);
        assert_eq!(value["drawnAreaHa"], 0.98);
        assert!(value.get("is_valid").is_none());
    }

    #[test]
    fn roundtrip_json() {
        let verdict = ValidationVerdict {
            is_valid: true,
            drawn_area_ha: 1.02,
            plot_area_ha: 1.0,
            difference_percent: 2.0,
            tolerance_percent: 10.0,
            message: "within tolerance".to_string(),
        };
        let json = serde_json::to_string(&verdict).unwrap();
        let back: ValidationVerdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, verdict);
    }
}
