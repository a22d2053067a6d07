use crate::io::{column, lines_of, parse_u32, CsvError};
use crate::task::{Priority, TaskRecord};

/// Parses a task CSV: header `id,start_point,end_point,priority,remaining_time`
/// (skipped, recognized the same way as the map header; the fifth column is
/// read positionally, so a literal header spelling of `deadline` instead of
/// `remaining_time` parses identically). `priority` and the deadline column
/// are optional — a missing or empty `priority` becomes [`Priority::Normal`],
/// a missing or empty value in the fifth column becomes `None`.
pub fn parse_task_csv(content: &str) -> Result<Vec<TaskRecord>, CsvError> {
    let mut records = Vec::new();

    for (line, raw) in lines_of(content) {
        let fields: Vec<&str> = raw.split(',').collect();
        if line == 1 && column(&fields, 0, line, "id")?.eq_ignore_ascii_case("id") {
            continue;
        }

        let external_id = column(&fields, 0, line, "id")?.to_string();
        let start_point_name = column(&fields, 1, line, "start_point")?.to_string();
        let end_point_name = column(&fields, 2, line, "end_point")?.to_string();
        let priority = fields
            .get(3)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Priority::parse)
            .unwrap_or(Priority::Normal);
        let deadline = match fields.get(4).map(|s| s.trim()).filter(|s| !s.is_empty()) {
            Some(raw_deadline) => Some(parse_u32(raw_deadline, line, "deadline")?),
            None => None,
        };

        records.push(TaskRecord { external_id, start_point_name, end_point_name, priority, deadline });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_header() {
        let csv = "id,start_point,end_point,priority,deadline\n1,SP01,EP01,high,120\n2,SP02,EP02,,\n";
        let records = parse_task_csv(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].priority, Priority::High);
        assert_eq!(records[0].deadline, Some(120));
        assert_eq!(records[1].priority, Priority::Normal);
        assert_eq!(records[1].deadline, None);
    }

    #[test]
    fn row_with_too_few_columns_is_an_error() {
        let csv = "1,SP01\n";
        let err = parse_task_csv(csv).unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn { column: "end_point", .. }));
    }
}
