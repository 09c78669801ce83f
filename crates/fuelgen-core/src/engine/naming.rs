use crate::core::models::compound::Family;
use std::collections::HashSet;

const PREFIXES: [&str; 22] = [
    "Meth", "Eth", "Prop", "But", "Pent", "Hex", "Hept", "Oct", "Non", "Dec", "Undec", "Dodec",
    "Tridec", "Tetradec", "Pentadec", "Hexadec", "Heptadec", "Octadec", "Nonadec", "Eicos",
    "Henicos", "Docos",
];

/// IUPAC-style multiplying prefix for a carbon count, falling back to `C{n}`
/// beyond the named range.
pub fn alkyl_prefix(carbons: u32) -> String {
    match carbons {
        1..=22 => PREFIXES[(carbons - 1) as usize].to_string(),
        n => format!("C{}", n),
    }
}

/// Synthesizes the deterministic family-specific name for a compound with the
/// given carbon count. Six-carbon aromatics are named "Benzene".
pub fn systematic_name(family: Family, carbons: u32) -> String {
    match family {
        Family::NAlkanes => format!("n-{}ane", alkyl_prefix(carbons)),
        Family::IsoAlkanes => format!("iso-{}ane", alkyl_prefix(carbons)),
        Family::Alkenes => format!("1-{}ene", alkyl_prefix(carbons)),
        Family::Aromatics => {
            if carbons == 6 {
                "Benzene".to_string()
            } else {
                format!("{}ylbenzene", alkyl_prefix(carbons - 6))
            }
        }
        Family::Alcohols => format!("1-{}anol", alkyl_prefix(carbons)),
        Family::Esters => format!("Methyl {}anoate", alkyl_prefix(carbons - 1).to_lowercase()),
    }
}

/// Resolves a name collision by suffixing an incrementing synthetic-isomer
/// index until the name is unused.
pub fn disambiguate(base_name: String, used: &HashSet<String>) -> String {
    if !used.contains(&base_name) {
        return base_name;
    }
    let mut isomer_idx = 2;
    loop {
        let candidate = format!("{} (synth. #{})", base_name, isomer_idx);
        if !used.contains(&candidate) {
            return candidate;
        }
        isomer_idx += 1;
    }
}
