//! Product naming for World Famous and Kuro Sumi SKUs.
//!
//! Invoice descriptions for these lines are often truncated or split across
//! rows, so well-known product families get a fixed display name keyed on
//! the SKU prefix.

use super::patterns::{LEADING_DIGITS, WF_BOTTLE_COUNT};

/// SKU family with its own naming, checked in [`NAMING_RULES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingRule {
    /// `WFADPP*`
    PanchoPastel,
    /// `WFMHS*`
    MustHavesSet,
    /// `WFSTSS*`
    SantucciSkintoneSet,
    /// `KSZP`
    ZhangPoSet,
    /// `KSOL*`, `KSOI*`
    KuroSumiOutlining,
    /// `KSG6`
    KuroSumiGreywash,
    /// `KSSW*`
    SamuraiWhite,
    /// Any other `KS*`.
    KuroSumi,
    /// Everything else.
    WorldFamous,
}

/// Rules in match order; the first that accepts a code wins.
pub const NAMING_RULES: [NamingRule; 9] = [
    NamingRule::PanchoPastel,
    NamingRule::MustHavesSet,
    NamingRule::SantucciSkintoneSet,
    NamingRule::ZhangPoSet,
    NamingRule::KuroSumiOutlining,
    NamingRule::KuroSumiGreywash,
    NamingRule::SamuraiWhite,
    NamingRule::KuroSumi,
    NamingRule::WorldFamous,
];

impl NamingRule {
    /// First rule accepting `code`.
    pub fn for_code(code: &str) -> Self {
        NAMING_RULES
            .into_iter()
            .find(|rule| rule.matches(code))
            .unwrap_or(Self::WorldFamous)
    }

    /// Whether this rule applies to `code`.
    pub fn matches(&self, code: &str) -> bool {
        match self {
            Self::PanchoPastel => code.starts_with("WFADPP"),
            Self::MustHavesSet => code.starts_with("WFMHS"),
            Self::SantucciSkintoneSet => code.starts_with("WFSTSS"),
            Self::ZhangPoSet => code == "KSZP",
            Self::KuroSumiOutlining => code.starts_with("KSOL") || code.starts_with("KSOI"),
            Self::KuroSumiGreywash => code == "KSG6",
            Self::SamuraiWhite => code.starts_with("KSSW"),
            Self::KuroSumi => code.starts_with("KS"),
            Self::WorldFamous => true,
        }
    }

    /// Display name for `code`, given its cleaned description.
    ///
    /// May be empty for plain World Famous lines whose description held
    /// nothing but the brand.
    pub fn name(&self, code: &str, cleaned: &str) -> String {
        match self {
            Self::PanchoPastel => {
                let number = LEADING_DIGITS
                    .find(code)
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                format!("Pancho Pastel #{}", number)
            }
            Self::MustHavesSet => format!(
                "World Famous Must-Haves {} Bottle Ink Set",
                bottle_count(cleaned, 12)
            ),
            Self::SantucciSkintoneSet => "Santucci Skintone Set".to_string(),
            Self::ZhangPoSet => format!(
                "Kuro Sumi {} Bottle Zhang Po Shading Set",
                bottle_count(cleaned, 4)
            ),
            Self::KuroSumiOutlining => "Kuro Sumi Outlining".to_string(),
            Self::KuroSumiGreywash => "Kuro Sumi Greywash".to_string(),
            Self::SamuraiWhite => "Kuro Sumi Samurai White".to_string(),
            Self::KuroSumi => {
                let rest = cleaned.replace("Kuro Sumi", "").replace("World Famous", "");
                format!("Kuro Sumi {}", rest.trim()).trim().to_string()
            }
            Self::WorldFamous => cleaned.replace("World Famous", "").trim().to_string(),
        }
    }
}

/// Known SKU prefixes and their product names, checked in order.
const FRIENDLY_NAMES: &[(&str, &str)] = &[
    ("WFFMW", "Mt. Fuji Mixing White"),
    ("WFPW", "Portrait White"),
    ("WFMDGW", "Mid-tone Greywash"),
    ("WFMTGW", "Mid-tone Greywash"),
    ("WFP2H", "Poch 2H"),
    ("WFILL", "Illuminati Yellow"),
    ("WFLGW", "Light Greywash"),
    ("WFDGW", "Dark Greywash"),
    ("WFBW", "Blackwash"),
    ("WFMW", "Mixing White"),
    ("WFLW", "Lining White"),
    ("WFHW", "High White"),
    ("WFBB", "Blue Black"),
    ("WFPB", "Pure Black"),
    ("WFGB", "Golden Black"),
    ("WFDB", "Dark Black"),
    ("WFXB", "Extreme Black"),
    ("WFUB", "Ultimate Black"),
    ("WFMKSK", "Maks Skintone"),
];

/// Name derived from the SKU alone.
///
/// Known prefixes map to their product name. Otherwise the brand prefix
/// and everything from the first digit on are dropped and the remaining
/// letters are split before each capital: `WFABC12` becomes `A B C`.
pub fn friendly_name(code: &str) -> String {
    if let Some((_, name)) = FRIENDLY_NAMES
        .iter()
        .find(|(prefix, _)| code.starts_with(prefix))
    {
        return (*name).to_string();
    }

    let stem = code
        .strip_prefix("WF")
        .or_else(|| code.strip_prefix("KS"))
        .unwrap_or(code);
    let letters = stem
        .split(|c: char| c.is_ascii_digit())
        .next()
        .unwrap_or_default();

    let mut words: Vec<String> = Vec::new();
    for c in letters.chars() {
        match words.last_mut() {
            Some(word) if !c.is_uppercase() => word.push(c),
            _ => words.push(c.to_string()),
        }
    }
    words.join(" ")
}

fn bottle_count(text: &str, default: u32) -> u32 {
    WF_BOTTLE_COUNT
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(default)
}
