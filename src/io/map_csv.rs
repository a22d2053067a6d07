use crate::geom::{Direction, Point};
use crate::io::{column, lines_of, parse_i32, CsvError};
use crate::map_element::{ElementKind, MapElement};

/// Parses a map CSV: header `type,name,x,y,pitch` (the header row itself is
/// skipped, recognized by a non-numeric `x` column), `pitch` a degree value
/// required for `agv` rows and ignored otherwise.
pub fn parse_map_csv(content: &str) -> Result<Vec<MapElement>, CsvError> {
    let mut elements = Vec::new();

    for (line, raw) in lines_of(content) {
        let fields: Vec<&str> = raw.split(',').collect();
        let type_col = column(&fields, 0, line, "type")?;
        let x_col = column(&fields, 2, line, "x")?;
        if line == 1 && x_col.parse::<i32>().is_err() {
            continue; // header row
        }

        let kind = ElementKind::parse(type_col)
            .ok_or_else(|| CsvError::InvalidValue { line, column: "type", value: type_col.to_string() })?;
        let name = column(&fields, 1, line, "name")?.to_string();
        let x = parse_i32(x_col, line, "x")?;
        let y = parse_i32(column(&fields, 3, line, "y")?, line, "y")?;

        let pitch = match fields.get(4).map(|s| s.trim()).filter(|s| !s.is_empty()) {
            Some(raw_pitch) => {
                let degrees = parse_i32(raw_pitch, line, "pitch")?;
                Some(Direction::from_degrees(degrees.rem_euclid(360) as u32).ok_or_else(|| CsvError::InvalidValue {
                    line,
                    column: "pitch",
                    value: raw_pitch.to_string(),
                })?)
            }
            None => None,
        };

        if kind == ElementKind::Agv && pitch.is_none() {
            return Err(CsvError::MissingColumn { line, column: "pitch" });
        }

        elements.push(MapElement::new(kind, name, Point::new(x, y), pitch));
    }

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_header() {
        let csv = "type,name,x,y,pitch\nstart_point,SP01,3,5,\nagv,AGV01,5,5,0\n";
        let elements = parse_map_csv(csv).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].kind, ElementKind::StartPoint);
        assert_eq!(elements[1].pitch, Some(Direction::Right));
    }

    #[test]
    fn agv_without_pitch_is_an_error() {
        let csv = "agv,AGV01,5,5,\n";
        let err = parse_map_csv(csv).unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn { column: "pitch", .. }));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let csv = "parking_spot,X,1,1,\n";
        let err = parse_map_csv(csv).unwrap_err();
        assert!(matches!(err, CsvError::InvalidValue { column: "type", .. }));
    }
}
