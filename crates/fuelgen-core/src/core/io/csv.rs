use crate::core::models::blend::{Blend, BlendRating};
use crate::core::models::compound::{Compound, Family, Property};
use crate::core::models::table::ComponentTable;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Column order of the component table, fixed by the downstream schema.
pub const COMPONENT_HEADER: [&str; 18] = [
    "name",
    "formula",
    "family",
    "carbons",
    "Molecular_Weight",
    "HC_ratio",
    "O2_wt_percent",
    "RON",
    "MON",
    "AKI",
    "CN",
    "LHV",
    "Density",
    "BP",
    "FP",
    "Oxidative_Stability",
    "Gum_Content",
    "Acidity",
];

/// Column order of the blend table. Rating columns not applicable to a row's
/// fuel type stay empty.
pub const BLEND_HEADER: [&str; 15] = [
    "fuel_type",
    "component_1",
    "component_1_vol_pct",
    "component_2",
    "component_2_vol_pct",
    "RON",
    "MON",
    "AKI",
    "CN",
    "LHV",
    "Density",
    "O2_wt_percent",
    "Oxidative_Stability",
    "Gum_Content",
    "Acidity",
];

/// Measured-property columns of the component table, in header order.
const MEASURED_COLUMNS: [(usize, Property); 10] = [
    (7, Property::Ron),
    (8, Property::Mon),
    (10, Property::Cn),
    (11, Property::Lhv),
    (12, Property::Density),
    (13, Property::BoilingPoint),
    (14, Property::FlashPoint),
    (15, Property::OxidativeStability),
    (16, Property::GumContent),
    (17, Property::Acidity),
];

#[derive(Debug, Error)]
pub enum CsvTableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Unexpected header in '{path}': expected the component table schema")]
    Header { path: String },
    #[error("Invalid value in '{path}' row {row}: {message}")]
    Invalid {
        path: String,
        row: usize,
        message: String,
    },
    #[error("Duplicate component name in '{path}': '{name}'")]
    DuplicateName { path: String, name: String },
}

fn io_err(path: &Path, source: std::io::Error) -> CsvTableError {
    CsvTableError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    }
}

fn csv_err(path: &Path, source: csv::Error) -> CsvTableError {
    CsvTableError::Csv {
        path: path.to_string_lossy().to_string(),
        source,
    }
}

/// Writes the component table with the fixed column order; absent properties
/// become empty fields, never zeros.
pub fn write_components(path: &Path, table: &ComponentTable) -> Result<(), CsvTableError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(path, e))?;
    writer
        .write_record(COMPONENT_HEADER)
        .map_err(|e| csv_err(path, e))?;

    for compound in table.iter() {
        let mut record = Vec::with_capacity(COMPONENT_HEADER.len());
        record.push(compound.name.clone());
        record.push(compound.formula.clone());
        record.push(compound.family.to_string());
        record.push(compound.carbons.to_string());
        record.push(format_value(compound.molecular_weight));
        record.push(format_value(compound.hc_ratio));
        record.push(format_value(compound.o2_wt_percent));
        record.push(format_optional(compound.property(Property::Ron)));
        record.push(format_optional(compound.property(Property::Mon)));
        record.push(format_optional(compound.aki));
        for property in [
            Property::Cn,
            Property::Lhv,
            Property::Density,
            Property::BoilingPoint,
            Property::FlashPoint,
            Property::OxidativeStability,
            Property::GumContent,
            Property::Acidity,
        ] {
            record.push(format_optional(compound.property(property)));
        }
        writer.write_record(&record).map_err(|e| csv_err(path, e))?;
    }
    writer.flush().map_err(|e| io_err(path, e))?;
    Ok(())
}

/// Reads a component table back, restoring absence from empty fields and
/// recomputing every derived column from family and carbon count.
pub fn read_components(path: &Path) -> Result<ComponentTable, CsvTableError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_err(path, e))?;

    let headers = reader.headers().map_err(|e| csv_err(path, e))?.clone();
    if headers.len() != COMPONENT_HEADER.len()
        || headers.iter().zip(COMPONENT_HEADER).any(|(a, b)| a != b)
    {
        return Err(CsvTableError::Header {
            path: path.to_string_lossy().to_string(),
        });
    }

    let mut compounds = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 2; // 1-based, after the header line
        let record = result.map_err(|e| csv_err(path, e))?;
        let invalid = |message: String| CsvTableError::Invalid {
            path: path.to_string_lossy().to_string(),
            row,
            message,
        };

        let name = record.get(0).unwrap_or_default().to_string();
        if !seen.insert(name.clone()) {
            return Err(CsvTableError::DuplicateName {
                path: path.to_string_lossy().to_string(),
                name,
            });
        }
        let family: Family = record
            .get(2)
            .unwrap_or_default()
            .parse()
            .map_err(|e| invalid(format!("{}", e)))?;
        let carbons: u32 = record
            .get(3)
            .unwrap_or_default()
            .parse()
            .map_err(|_| invalid("carbons must be a positive integer".to_string()))?;

        let mut properties = BTreeMap::new();
        for (column, property) in MEASURED_COLUMNS {
            let field = record.get(column).unwrap_or_default();
            if field.is_empty() {
                continue;
            }
            let value: f64 = field
                .parse()
                .map_err(|_| invalid(format!("{} must be numeric, got '{}'", property, field)))?;
            properties.insert(property, value);
        }
        compounds.push(Compound::assemble(name, family, carbons, properties));
    }
    Ok(ComponentTable::new(compounds))
}

/// Writes the blend table with numeric cells rounded to 3 decimals.
pub fn write_blends(path: &Path, blends: &[Blend]) -> Result<(), CsvTableError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(path, e))?;
    writer
        .write_record(BLEND_HEADER)
        .map_err(|e| csv_err(path, e))?;

    for blend in blends {
        let (ron, mon, aki, cn) = match blend.rating {
            BlendRating::Gasoline { ron, mon, aki } => {
                (Some(ron), Some(mon), Some(aki), None)
            }
            BlendRating::Diesel { cn } => (None, None, None, Some(cn)),
        };
        let record = [
            blend.fuel_type.to_string(),
            blend.component_1.clone(),
            format_value(round3(blend.component_1_vol_pct)),
            blend.component_2.clone(),
            format_value(round3(blend.component_2_vol_pct)),
            format_optional(ron.map(round3)),
            format_optional(mon.map(round3)),
            format_optional(aki.map(round3)),
            format_optional(cn.map(round3)),
            format_value(round3(blend.bulk.lhv)),
            format_value(round3(blend.bulk.density)),
            format_value(round3(blend.bulk.o2_wt_percent)),
            format_value(round3(blend.bulk.oxidative_stability)),
            format_value(round3(blend.bulk.gum_content)),
            format_value(round3(blend.bulk.acidity)),
        ];
        writer.write_record(&record).map_err(|e| csv_err(path, e))?;
    }
    writer.flush().map_err(|e| io_err(path, e))?;
    Ok(())
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn format_value(value: f64) -> String {
    format!("{}", value)
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::blend::{BulkProperties, FuelType};
    use tempfile::tempdir;

    fn sample_table() -> ComponentTable {
        let mut with_octane = BTreeMap::new();
        with_octane.insert(Property::Ron, 100.0);
        with_octane.insert(Property::Mon, 100.0);
        with_octane.insert(Property::Cn, 17.0);
        with_octane.insert(Property::Density, 0.692);

        let mut without_octane = BTreeMap::new();
        without_octane.insert(Property::Cn, 86.0);
        without_octane.insert(Property::BoilingPoint, 315.0);

        ComponentTable::new(vec![
            Compound::assemble("Isooctane".to_string(), Family::IsoAlkanes, 8, with_octane),
            Compound::assemble(
                "Methyl Palmitate".to_string(),
                Family::Esters,
                17,
                without_octane,
            ),
        ])
    }

    #[test]
    fn component_table_round_trips_including_absence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("components.csv");
        let table = sample_table();

        write_components(&path, &table).unwrap();
        let restored = read_components(&path).unwrap();

        assert_eq!(restored.len(), 2);
        let iso = restored.get("Isooctane").unwrap();
        assert_eq!(iso.property(Property::Ron), Some(100.0));
        assert_eq!(iso.aki, Some(100.0));
        assert_eq!(iso.formula, "C8H18");

        let ester = restored.get("Methyl Palmitate").unwrap();
        assert_eq!(ester.property(Property::Ron), None);
        assert_eq!(ester.aki, None);
        assert_eq!(ester.property(Property::Cn), Some(86.0));
    }

    #[test]
    fn unexpected_header_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "name,family\nX,Esters\n").unwrap();
        let err = read_components(&path).unwrap_err();
        assert!(matches!(err, CsvTableError::Header { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dup.csv");
        let mut content = COMPONENT_HEADER.join(",");
        content.push('\n');
        for _ in 0..2 {
            content.push_str("Benzene,C6H6,Aromatics,6,78.11,1.0,0,120,107,113.5,3,40.6,0.867,111,4,480,1.5,0.005\n");
        }
        std::fs::write(&path, content).unwrap();
        let err = read_components(&path).unwrap_err();
        assert!(matches!(err, CsvTableError::DuplicateName { name, .. } if name == "Benzene"));
    }

    #[test]
    fn non_numeric_cell_reports_row_and_property() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad_cell.csv");
        let mut content = COMPONENT_HEADER.join(",");
        content.push('\n');
        content.push_str("X,C6H6,Aromatics,6,78.11,1.0,0,high,,,,,,,,,,\n");
        std::fs::write(&path, content).unwrap();
        let err = read_components(&path).unwrap_err();
        assert!(matches!(err, CsvTableError::Invalid { row: 2, .. }));
    }

    #[test]
    fn blend_rows_leave_inapplicable_ratings_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blends.csv");
        let blends = vec![
            Blend {
                fuel_type: FuelType::Gasoline,
                component_1: "Isooctane".to_string(),
                component_1_vol_pct: 80.0,
                component_2: "Ethanol".to_string(),
                component_2_vol_pct: 20.0,
                rating: BlendRating::Gasoline {
                    ron: 101.23456,
                    mon: 98.7,
                    aki: 99.967,
                },
                bulk: BulkProperties {
                    lhv: 42.0,
                    density: 0.71,
                    o2_wt_percent: 7.5,
                    oxidative_stability: 980.0,
                    gum_content: 0.18,
                    acidity: 0.0012,
                },
            },
            Blend {
                fuel_type: FuelType::Diesel,
                component_1: "n-Hexadecane".to_string(),
                component_1_vol_pct: 90.0,
                component_2: "1-Butanol".to_string(),
                component_2_vol_pct: 10.0,
                rating: BlendRating::Diesel { cn: 88.4 },
                bulk: BulkProperties {
                    lhv: 43.1,
                    density: 0.775,
                    o2_wt_percent: 2.3,
                    oxidative_stability: 940.0,
                    gum_content: 0.12,
                    acidity: 0.002,
                },
            },
        ];

        write_blends(&path, &blends).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], BLEND_HEADER.join(","));
        // Gasoline row: RON rounded to 3 decimals, CN column empty.
        assert!(lines[1].starts_with("gasoline,Isooctane,80,Ethanol,20,101.235,98.7,99.967,,"));
        // Diesel row: octane columns empty, CN present.
        assert!(lines[2].starts_with("diesel,n-Hexadecane,90,1-Butanol,10,,,,88.4,"));
    }
}
