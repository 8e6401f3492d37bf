use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_decimal::Decimal;

use crate::catalog::schema::{CatalogDef, CropTarget, FertilizerSpec, SoilDef};
use crate::error::MyllaError;
use crate::model::{FertilizerClass, NutrientLevels};
use crate::parsing::normalize::normalize_soil_name;
use crate::parsing::values::{f64_to_decimal, parse_level};

const CROPS_SHEET: &str = "Crops";
const FERTILIZERS_SHEET: &str = "Fertilizers";

/// Parse a spreadsheet catalog.
///
/// Expects two sheets, each with a header row:
/// - `Crops`: id | name | nitrogen | phosphorus | potassium | soils
/// - `Fertilizers`: name | class | nitrogen | phosphorus | potassium
///
/// The optional `soils` column lists soil names separated by `,` or `;`.
/// Reading stops at the first row with an empty first cell.
pub fn parse_catalog_xlsx(bytes: &[u8], name: &str) -> Result<CatalogDef, MyllaError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| MyllaError::ParseError(format!("failed to open xlsx: {e}")))?;

    let crops_sheet = workbook
        .worksheet_range(CROPS_SHEET)
        .map_err(|e| MyllaError::ParseError(format!("sheet '{CROPS_SHEET}' not found: {e}")))?;
    let fertilizers_sheet = workbook.worksheet_range(FERTILIZERS_SHEET).map_err(|e| {
        MyllaError::ParseError(format!("sheet '{FERTILIZERS_SHEET}' not found: {e}"))
    })?;

    let mut crops = Vec::new();
    let mut soils: Vec<SoilDef> = Vec::new();

    for (idx, row) in crops_sheet.rows().enumerate().skip(1) {
        let id = match row.first().and_then(cell_as_string) {
            Some(id) => id,
            None => break,
        };
        let row_no = idx + 1;
        let crop_name = row.get(1).and_then(cell_as_string).unwrap_or_else(|| id.clone());
        let target = levels_from_row(row, 2, row_no, CROPS_SHEET)?;

        if let Some(soil_list) = row.get(5).and_then(cell_as_string) {
            for soil_name in soil_list
                .split(&[',', ';'][..])
                .map(str::trim)
                .filter(|s| !s.is_empty())
            {
                add_soil_crop(&mut soils, soil_name, &id);
            }
        }

        crops.push(CropTarget {
            id,
            name: crop_name,
            target,
            note: None,
        });
    }

    let mut fertilizers = Vec::new();
    for (idx, row) in fertilizers_sheet.rows().enumerate().skip(1) {
        let fertilizer_name = match row.first().and_then(cell_as_string) {
            Some(n) => n,
            None => break,
        };
        let row_no = idx + 1;
        let class_text = row.get(1).and_then(cell_as_string).unwrap_or_default();
        let class = FertilizerClass::from_str_loose(&class_text).ok_or_else(|| {
            MyllaError::ParseError(format!(
                "{FERTILIZERS_SHEET} row {row_no}: unknown fertilizer class '{class_text}'"
            ))
        })?;
        let content = levels_from_row(row, 2, row_no, FERTILIZERS_SHEET)?;

        fertilizers.push(FertilizerSpec {
            name: fertilizer_name,
            class,
            content,
        });
    }

    if crops.is_empty() {
        return Err(MyllaError::ParseError(format!(
            "no crop rows found in sheet '{CROPS_SHEET}'"
        )));
    }

    Ok(CatalogDef {
        name: name.to_string(),
        description: None,
        version: "xlsx".into(),
        soils,
        crops,
        fertilizers,
    })
}

/// File a crop under a soil, merging names that normalize alike
/// ("Black Soil" and "black" are one soil).
fn add_soil_crop(soils: &mut Vec<SoilDef>, soil_name: &str, crop_id: &str) {
    let key = normalize_soil_name(soil_name);
    match soils.iter_mut().find(|s| normalize_soil_name(&s.name) == key) {
        Some(soil) => soil.crops.push(crop_id.to_string()),
        None => soils.push(SoilDef {
            name: soil_name.to_string(),
            crops: vec![crop_id.to_string()],
        }),
    }
}

/// Read three consecutive N, P, K cells starting at `first_col`.
fn levels_from_row(
    row: &[Data],
    first_col: usize,
    row_no: usize,
    sheet: &str,
) -> Result<NutrientLevels, MyllaError> {
    let cell = |offset: usize| -> Result<Decimal, MyllaError> {
        let col = first_col + offset;
        cell_as_decimal(row.get(col)).ok_or_else(|| {
            let text = row.get(col).map(|c| format!("{c}")).unwrap_or_default();
            MyllaError::ParseError(format!(
                "{sheet} row {row_no}, column {}: expected a number, found '{text}'",
                col + 1
            ))
        })
    };

    Ok(NutrientLevels::new(cell(0)?, cell(1)?, cell(2)?))
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

/// Empty cells count as zero content.
fn cell_as_decimal(cell: Option<&Data>) -> Option<Decimal> {
    match cell {
        None | Some(Data::Empty) => Some(Decimal::ZERO),
        Some(Data::Float(f)) => f64_to_decimal(*f),
        Some(Data::Int(i)) => Some(Decimal::from(*i)),
        Some(Data::String(s)) if s.trim().is_empty() => Some(Decimal::ZERO),
        Some(Data::String(s)) => parse_level(s).ok(),
        Some(_) => None,
    }
}
