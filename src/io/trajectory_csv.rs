use crate::geom::Point;
use crate::io::{column, lines_of, parse_u32, CsvError};
use crate::recorder::{Recorder, TrajectoryRow};
use crate::task::TaskId;
use std::fmt::Write as _;

const HEADER: &str = "timestamp,name,X,Y,pitch,loaded,destination,Emergency,id";

/// Renders a recorded trajectory as CSV, one header row followed by one row
/// per recorded observation (tick 0 first, then every AGV per tick
/// thereafter). `destination` is the loaded task's end-point name when
/// loaded, empty otherwise; the trailing `id` column is the loaded task's
/// index, also empty when idle.
pub fn write_trajectory_csv(recorder: &Recorder) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for row in recorder.rows() {
        let destination = row.destination_name.clone().unwrap_or_default();
        let task_id = row.task_id.map(|t| t.0.to_string()).unwrap_or_default();

        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            row.timestamp,
            row.agv_name,
            row.position.x,
            row.position.y,
            row.heading_degrees,
            row.loaded,
            destination,
            row.emergency,
            task_id,
        )
        .expect("writing to a String never fails");
    }

    out
}

/// One row parsed back out of a trajectory CSV. Loses the `Point` structure
/// of `destination` (stored as the raw formatted string) since it is
/// advisory, not re-fed into a `Context`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTrajectoryRow {
    pub timestamp: u32,
    pub agv_name: String,
    pub position: Point,
    pub heading_degrees: u32,
    pub loaded: bool,
    pub destination: Option<String>,
    pub emergency: bool,
    pub task_id: Option<TaskId>,
}

/// Parses a trajectory CSV written by [`write_trajectory_csv`] (or matching
/// its column layout). Mainly useful for replay/inspection tooling external
/// to the scheduler itself.
pub fn parse_trajectory_csv(content: &str) -> Result<Vec<ParsedTrajectoryRow>, CsvError> {
    let mut rows = Vec::new();

    for (line, raw) in lines_of(content) {
        let fields: Vec<&str> = raw.split(',').collect();
        if line == 1 && column(&fields, 0, line, "timestamp")?.eq_ignore_ascii_case("timestamp") {
            continue;
        }

        let timestamp = parse_u32(column(&fields, 0, line, "timestamp")?, line, "timestamp")?;
        let agv_name = column(&fields, 1, line, "name")?.to_string();
        let x = column(&fields, 2, line, "X")?
            .parse::<i32>()
            .map_err(|_| CsvError::InvalidValue { line, column: "X", value: column(&fields, 2, line, "X")?.to_string() })?;
        let y = column(&fields, 3, line, "Y")?
            .parse::<i32>()
            .map_err(|_| CsvError::InvalidValue { line, column: "Y", value: column(&fields, 3, line, "Y")?.to_string() })?;
        let heading_degrees = parse_u32(column(&fields, 4, line, "pitch")?, line, "pitch")?;
        let loaded = parse_bool(column(&fields, 5, line, "loaded")?, line, "loaded")?;
        let destination = column(&fields, 6, line, "destination")?.trim();
        let destination = if destination.is_empty() { None } else { Some(destination.to_string()) };
        let emergency = parse_bool(column(&fields, 7, line, "Emergency")?, line, "Emergency")?;
        let task_id = match fields.get(8).map(|s| s.trim()).filter(|s| !s.is_empty()) {
            Some(raw_id) => Some(TaskId(
                raw_id.parse::<usize>().map_err(|_| CsvError::InvalidValue { line, column: "id", value: raw_id.to_string() })?,
            )),
            None => None,
        };

        rows.push(ParsedTrajectoryRow {
            timestamp,
            agv_name,
            position: Point::new(x, y),
            heading_degrees,
            loaded,
            destination,
            emergency,
            task_id,
        });
    }

    Ok(rows)
}

fn parse_bool(raw: &str, line: usize, name: &'static str) -> Result<bool, CsvError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(CsvError::InvalidValue { line, column: name, value: raw.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agv::{Agv, AgvId};
    use crate::geom::Direction;

    #[test]
    fn renders_header_and_one_row_per_agv() {
        let agvs = vec![Agv::new(AgvId(0), "AGV01", Point::new(1, 1), Direction::Right)];
        let recorder = Recorder::new(&agvs);
        let csv = write_trajectory_csv(&recorder);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "0,AGV01,1,1,0,false,,false,");
    }

    #[test]
    fn round_trips_through_write_and_parse() {
        let agvs = vec![Agv::new(AgvId(0), "AGV01", Point::new(3, 4), Direction::Up)];
        let recorder = Recorder::new(&agvs);
        let csv = write_trajectory_csv(&recorder);
        let parsed = parse_trajectory_csv(&csv).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].position, Point::new(3, 4));
        assert_eq!(parsed[0].heading_degrees, 90);
        assert!(!parsed[0].loaded);
    }
}
