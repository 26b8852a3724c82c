use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

const LIVE_BASE: &str = "https://htspoly.com/product";
const MICRO_BASE: &str = "https://qr.htspoly.com";

/// One product page pair: the canonical live page and its QR-redirect
/// mirror. Identity is the name within its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub live: String,
    pub micro: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        live: impl Into<String>,
        micro: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            live: live.into(),
            micro: micro.into(),
            subsection: None,
        }
    }

    /// Both sides share the same slug.
    fn from_slug(name: &str, slug: &str) -> Self {
        Self::from_slugs(name, slug, slug)
    }

    /// Live and micro slugs diverge for a handful of products.
    fn from_slugs(name: &str, live_slug: &str, micro_slug: &str) -> Self {
        Self::new(
            name,
            format!("{LIVE_BASE}/{live_slug}"),
            format!("{MICRO_BASE}/{micro_slug}"),
        )
    }

    fn with_subsection(mut self, label: &str) -> Self {
        self.subsection = Some(label.to_string());
        self
    }
}

/// A named, ordered group of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub products: Vec<Product>,
}

/// The static product catalogue: an ordered mapping from category name
/// to products. Insertion order is display order; the catalogue is
/// loaded once at startup and shared immutably.
///
/// Serializes as a JSON object whose keys keep catalogue order, which
/// a plain serde_json map would not guarantee.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    categories: Vec<Category>,
}

impl Catalogue {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }

    /// The published htspoly.com catalogue, excluding the Tools &
    /// Accessories and Equipment lines which carry no document links.
    pub fn default_catalogue() -> Self {
        Self::new(vec![
            Category {
                name: "Polyurea Joint Fill".to_string(),
                products: vec![
                    Product::from_slug("PE-45", "pe-45"),
                    Product::from_slug("PE-65", "pe-65"),
                    Product::from_slug("PE-85", "pe-85"),
                    Product::from_slug("PE-90", "pe-90"),
                ],
            },
            Category {
                name: "Concrete Repair".to_string(),
                products: vec![
                    Product::from_slug("TX-1", "tx-1"),
                    Product::from_slug("TX-2", "tx-2"),
                    Product::from_slug("TX-3", "tx-3"),
                    Product::from_slug("TX-GEL", "tx-gel"),
                    Product::from_slug("TX-PMF", "tx-pmf"),
                    Product::from_slug("TX-UV", "tx-uv"),
                ],
            },
            Category {
                name: "Densifiers & Sealers".to_string(),
                products: vec![
                    Product::from_slug("CD-HS", "cd-hs"),
                    Product::from_slug("CD-HSL", "cd-hsl"),
                    Product::from_slug("CD-LS", "cd-ls"),
                    Product::from_slug("CD-SS", "cd-ss"),
                    Product::from_slug("CS-PS", "cs-ps"),
                    Product::from_slugs("CS-PS SV", "cs-ps-sv", "cs-pssv"),
                    Product::from_slug("CS-HG", "cs-hg"),
                    Product::from_slug("CS-AC30", "cs-ac30"),
                ],
            },
            Category {
                name: "Floor Coatings".to_string(),
                products: vec![
                    Product::from_slug("EPX-60 WB", "epx-60wb").with_subsection("Epoxy"),
                    Product::from_slug("EPX-100", "epx-100").with_subsection("Epoxy"),
                    Product::from_slug("EPX-100 HV", "epx-100hv").with_subsection("Epoxy"),
                    Product::from_slug("PMR-60 WB", "pmr-60wb").with_subsection("Polyaspartic"),
                    Product::from_slug("PMR-100", "pmr-100").with_subsection("Polyaspartic"),
                    Product::from_slug("PAS-100", "pas-100").with_subsection("Polyaspartic"),
                    Product::from_slug("PAS-200", "pas-200").with_subsection("Polyaspartic"),
                    Product::from_slug("MCU-ST", "mcu-st")
                        .with_subsection("Moisture-Cured Urethane"),
                    Product::from_slug("MCU-MT", "mcu-mt")
                        .with_subsection("Moisture-Cured Urethane"),
                    Product::from_slug("MCU-HG", "mcu-hg")
                        .with_subsection("Moisture-Cured Urethane"),
                ],
            },
        ])
    }
}

impl Serialize for Catalogue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.products)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogue_shape() {
        let catalogue = Catalogue::default_catalogue();
        assert_eq!(catalogue.len(), 4);
        assert_eq!(catalogue.product_count(), 28);

        let names: Vec<&str> = catalogue
            .categories()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Polyurea Joint Fill",
                "Concrete Repair",
                "Densifiers & Sealers",
                "Floor Coatings",
            ]
        );
    }

    #[test]
    fn test_slug_divergence_preserved() {
        let catalogue = Catalogue::default_catalogue();
        let cs_ps_sv = catalogue.categories()[2]
            .products
            .iter()
            .find(|p| p.name == "CS-PS SV")
            .unwrap();
        assert_eq!(cs_ps_sv.live, "https://htspoly.com/product/cs-ps-sv");
        assert_eq!(cs_ps_sv.micro, "https://qr.htspoly.com/cs-pssv");
    }

    #[test]
    fn test_serializes_in_catalogue_order() {
        let catalogue = Catalogue::default_catalogue();
        let json = serde_json::to_string(&catalogue).unwrap();

        let joint = json.find("Polyurea Joint Fill").unwrap();
        let repair = json.find("Concrete Repair").unwrap();
        let sealers = json.find("Densifiers & Sealers").unwrap();
        let coatings = json.find("Floor Coatings").unwrap();
        assert!(joint < repair && repair < sealers && sealers < coatings);
    }

    #[test]
    fn test_subsection_omitted_when_absent() {
        let product = Product::new("PE-45", "https://h/live", "https://h/micro");
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("subsection").is_none());

        let labelled = Product::from_slug("EPX-100", "epx-100").with_subsection("Epoxy");
        let json = serde_json::to_value(&labelled).unwrap();
        assert_eq!(json["subsection"], "Epoxy");
    }
}
