use crate::antoine::{AntoineCoefficients, AntoineTable};

/// Built-in chemical with its Antoine fit (ln mmHg, kelvin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemicalCatalogEntry {
    pub name: &'static str,
    pub formula: &'static str,
    pub aliases: &'static [&'static str],
    pub coefficients: AntoineCoefficients,
}

impl ChemicalCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_ascii_lowercase().contains(&query)
            || self.formula.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

const fn entry(
    name: &'static str,
    formula: &'static str,
    aliases: &'static [&'static str],
    a: f64,
    b: f64,
    c: f64,
) -> ChemicalCatalogEntry {
    ChemicalCatalogEntry {
        name,
        formula,
        aliases,
        coefficients: AntoineCoefficients::new(a, b, c),
    }
}

// Reid, Prausnitz & Sherwood fits, ln(P/mmHg) = A - B/(T/K + C).
const CHEMICAL_CATALOG: [ChemicalCatalogEntry; 16] = [
    entry("acetone", "C3H6O", &["propanone"], 16.6513, 2940.46, -35.93),
    entry("methanol", "CH4O", &["methyl alcohol"], 18.5875, 3626.55, -34.29),
    entry("ethanol", "C2H6O", &["ethyl alcohol"], 18.9119, 3803.98, -41.68),
    entry("1-propanol", "C3H8O", &["n-propanol"], 17.5439, 3166.38, -80.15),
    entry("water", "H2O", &[], 18.3036, 3816.44, -46.13),
    entry("acetic acid", "C2H4O2", &["ethanoic acid"], 16.8080, 3405.57, -56.34),
    entry("chloroform", "CHCl3", &["trichloromethane"], 15.9732, 2696.79, -46.16),
    entry("benzene", "C6H6", &[], 15.9008, 2788.51, -52.36),
    entry("toluene", "C7H8", &["methylbenzene"], 16.0137, 3096.52, -53.67),
    entry("p-xylene", "C8H10", &["1,4-dimethylbenzene"], 16.0963, 3346.65, -57.84),
    entry("n-butane", "C4H10", &["butane"], 15.6782, 2154.90, -34.42),
    entry("n-pentane", "C5H12", &["pentane"], 15.8333, 2477.07, -39.94),
    entry("n-hexane", "C6H14", &["hexane"], 15.8366, 2697.55, -48.78),
    entry("n-heptane", "C7H16", &["heptane"], 15.8737, 2911.32, -56.51),
    entry("n-octane", "C8H18", &["octane"], 15.9426, 3120.29, -63.63),
    entry("n-nonane", "C9H20", &["nonane"], 15.9671, 3291.45, -71.33),
];

pub fn chemical_catalog() -> &'static [ChemicalCatalogEntry] {
    &CHEMICAL_CATALOG
}

pub fn filter_chemical_catalog(query: &str) -> Vec<ChemicalCatalogEntry> {
    chemical_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

impl AntoineTable {
    /// Table holding every built-in catalog entry, keyed by canonical name.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for entry in chemical_catalog() {
            table.insert(entry.name, entry.coefficients);
        }
        table
    }
}
