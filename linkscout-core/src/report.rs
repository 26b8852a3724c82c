use linkscout_scanner::DocumentLink;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Overall health classification of one product's link parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityStatus {
    /// Every live document key exists on the micro side.
    Ok,
    /// At least one live document key is missing from the micro side.
    Mismatch,
    /// The live page yielded no document links at all.
    NoDocs,
    /// One or both fetches failed.
    Error,
}

impl ParityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParityStatus::Ok => "ok",
            ParityStatus::Mismatch => "mismatch",
            ParityStatus::NoDocs => "no_docs",
            ParityStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ParityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full three-way diff for one product, rebuilt fresh on every
/// comparison. Field names are the wire format consumed by the page
/// and by downstream tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub name: String,
    pub live: String,
    pub micro: String,
    pub live_error: Option<String>,
    pub micro_error: Option<String>,
    /// Deduplicated live-side links, sorted by normalized key.
    pub live_links: Vec<DocumentLink>,
    /// Deduplicated micro-side links, sorted by normalized key.
    pub micro_links: Vec<DocumentLink>,
    /// Live-side hrefs whose key exists on both sides, sorted.
    pub matched: Vec<String>,
    /// Live-side hrefs absent from the micro side, sorted.
    pub missing_from_micro: Vec<String>,
    /// Micro-side hrefs absent from the live side, sorted.
    pub extra_on_micro: Vec<String>,
    pub status: ParityStatus,
}

/// Whole-catalogue comparison output: category name to that category's
/// reports, in catalogue order. Serializes as an ordered JSON object.
#[derive(Debug, Clone, Default)]
pub struct CatalogueReport {
    sections: Vec<(String, Vec<ComparisonReport>)>,
}

impl CatalogueReport {
    pub fn new(sections: Vec<(String, Vec<ComparisonReport>)>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[(String, Vec<ComparisonReport>)] {
        &self.sections
    }

    pub fn report_count(&self) -> usize {
        self.sections.iter().map(|(_, r)| r.len()).sum()
    }

    /// Worst status across the whole catalogue, in severity order
    /// error > mismatch > no_docs > ok. `None` for an empty report.
    pub fn worst_status(&self) -> Option<ParityStatus> {
        let severity = |status: ParityStatus| match status {
            ParityStatus::Error => 3,
            ParityStatus::Mismatch => 2,
            ParityStatus::NoDocs => 1,
            ParityStatus::Ok => 0,
        };
        self.sections
            .iter()
            .flat_map(|(_, reports)| reports.iter().map(|r| r.status))
            .max_by_key(|s| severity(*s))
    }
}

impl Serialize for CatalogueReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (name, reports) in &self.sections {
            map.serialize_entry(name, reports)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: ParityStatus) -> ComparisonReport {
        ComparisonReport {
            name: "PE-45".to_string(),
            live: "https://h/live".to_string(),
            micro: "https://h/micro".to_string(),
            live_error: None,
            micro_error: None,
            live_links: vec![],
            micro_links: vec![],
            matched: vec![],
            missing_from_micro: vec![],
            extra_on_micro: vec![],
            status,
        }
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ParityStatus::NoDocs).unwrap(),
            "\"no_docs\""
        );
        assert_eq!(serde_json::to_string(&ParityStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(
            serde_json::to_string(&ParityStatus::Mismatch).unwrap(),
            "\"mismatch\""
        );
        assert_eq!(
            serde_json::to_string(&ParityStatus::Error).unwrap(),
            "\"error\""
        );
    }

    #[test]
    fn test_report_wire_field_names() {
        let json = serde_json::to_value(report(ParityStatus::Ok)).unwrap();
        for field in [
            "name",
            "live",
            "micro",
            "live_error",
            "micro_error",
            "live_links",
            "micro_links",
            "matched",
            "missing_from_micro",
            "extra_on_micro",
            "status",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn test_worst_status_ranking() {
        let sections = vec![
            ("A".to_string(), vec![report(ParityStatus::Ok)]),
            (
                "B".to_string(),
                vec![report(ParityStatus::NoDocs), report(ParityStatus::Mismatch)],
            ),
        ];
        let catalogue_report = CatalogueReport::new(sections);
        assert_eq!(
            catalogue_report.worst_status(),
            Some(ParityStatus::Mismatch)
        );
        assert_eq!(CatalogueReport::default().worst_status(), None);
    }

    #[test]
    fn test_catalogue_report_preserves_section_order() {
        let sections = vec![
            ("Zeta".to_string(), vec![]),
            ("Alpha".to_string(), vec![]),
        ];
        let json = serde_json::to_string(&CatalogueReport::new(sections)).unwrap();
        assert!(json.find("Zeta").unwrap() < json.find("Alpha").unwrap());
    }
}
