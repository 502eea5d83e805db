//! Keyword-based spending categorization.
//!
//! The rule table is plain data: an ordered list of categories, each with
//! the merchant and service names that identify it. Matching is a
//! lower-cased substring test and the first category in table order wins.

/// Category assigned when no rule matches.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Other";

#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|kw| kw.to_string()).collect(),
        }
    }
}

/// Assigns spending categories from free text using an ordered rule table.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
    fallback: String,
}

impl Categorizer {
    pub fn new(rules: Vec<CategoryRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Returns the first category whose keyword list matches a substring
    /// of the lower-cased input; ties are resolved by table order.
    pub fn categorize(&self, text: &str) -> &str {
        let lower = text.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|keyword| lower.contains(keyword)) {
                return &rule.category;
            }
        }
        &self.fallback
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(default_rules(), DEFAULT_FALLBACK_CATEGORY)
    }
}

/// The built-in rule table, tuned for Italian bank statements.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "Spesa",
            &[
                "esselunga",
                "carrefour",
                "lidl",
                "coop",
                "conad",
                "iper",
                "supermercato",
                "market",
                "pam",
                "eurospin",
                "penny",
                "despar",
                "md discount",
                "aldi",
                "simply",
                "bennet",
                "todis",
                "tigre",
                "famila",
            ],
        ),
        CategoryRule::new(
            "Ristorazione",
            &[
                "mcdonald",
                "burger king",
                "starbucks",
                "ristorante",
                "pizzeria",
                "bar ",
                "cafe",
                "caffè",
                "delivery",
                "glovo",
                "uber eats",
                "just eat",
                "deliveroo",
                "trattoria",
                "osteria",
                "sushi",
                "kebab",
                "panino",
            ],
        ),
        CategoryRule::new(
            "Trasporti",
            &[
                "uber",
                "taxi",
                "trenitalia",
                "italo",
                "atm",
                "q8",
                "eni",
                "esso",
                "tamoil",
                "autostrade",
                "telepass",
                "ip ",
                "total",
                "shell",
                "flixbus",
                "ryanair",
                "easyjet",
                "alitalia",
                "itaairways",
                "benzina",
                "carburante",
                "diesel",
                "parcheggio",
                "parking",
                "car2go",
                "enjoy",
                "lime",
                "bird",
            ],
        ),
        CategoryRule::new(
            "Abbonamenti",
            &[
                "netflix",
                "spotify",
                "apple.com",
                "google ",
                "amazon prime",
                "disney",
                "adobe",
                "chatgpt",
                "openai",
                "microsoft",
                "dazn",
                "tim",
                "vodafone",
                "wind",
                "fastweb",
                "iliad",
                "sky",
                "now tv",
                "crunchyroll",
                "youtube",
                "twitch",
                "icloud",
                "dropbox",
                "notion",
                "figma",
            ],
        ),
        CategoryRule::new(
            "Shopping",
            &[
                "amazon",
                "zalando",
                "shein",
                "nike",
                "zara",
                "h&m",
                "ikea",
                "leroy merlin",
                "mediaworld",
                "unieuro",
                "decathlon",
                "primark",
                "ovs",
                "uniqlo",
                "asos",
                "ebay",
                "aliexpress",
                "wish",
            ],
        ),
        CategoryRule::new(
            "Lavoro",
            &[
                "stipendio",
                "emolumenti",
                "bonifico a vostro favore",
                "salary",
                "payroll",
                "cedolino",
                "compenso",
                "accredito",
                "retribuzione",
                "freelance",
                "fattura",
            ],
        ),
        CategoryRule::new(
            "Casa",
            &[
                "affitto",
                "condominio",
                "enel",
                "a2a",
                "iren",
                "edison",
                "bolletta",
                "luce",
                "gas",
                "acqua",
                "hera",
                "acea",
                "sorgenia",
                "eni gas",
                "mutuo",
            ],
        ),
        CategoryRule::new(
            "Salute",
            &[
                "farmacia",
                "dottore",
                "medico",
                "ospedale",
                "dentista",
                "parafarmacia",
                "clinic",
                "sanitaria",
                "visita",
                "analisi",
                "laboratorio",
                "ottico",
            ],
        ),
        CategoryRule::new(
            "Finanza",
            &[
                "paypal",
                "satispay",
                "revolut",
                "trade republic",
                "coinbase",
                "binance",
                "prelievo",
                "atm",
                "bancomat",
                "commissione",
                "interessi",
                "bollo",
            ],
        ),
        CategoryRule::new(
            "Istruzione",
            &[
                "università",
                "universita",
                "scuola",
                "corso",
                "udemy",
                "coursera",
                "masterclass",
                "skillshare",
                "libri",
                "libreria",
                "feltrinelli",
                "mondadori",
            ],
        ),
    ]
}
