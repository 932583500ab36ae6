//! Delimited text serialization of grant records.

use crate::data::GrantRecord;

/// Header row column names, in output order.
pub const CSV_HEADERS: [&str; 6] = [
    "Fiscal Year",
    "Opportunity ID",
    "Grant Program",
    "Project Sponsor",
    "Funding Amount",
    "Project Description",
];

/// Quote a text value, doubling embedded quotes.
pub fn escape_value(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Serialize records as comma-separated rows under a header row.
///
/// Numeric columns are written bare (funding truncated to whole dollars);
/// text columns are always quoted. Rows are separated by `\n`.
pub fn to_csv(records: &[GrantRecord]) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(CSV_HEADERS.join(","));

    for record in records {
        rows.push(
            [
                record.fiscal_year.to_string(),
                escape_value(&record.opportunity_id),
                escape_value(&record.program),
                escape_value(&record.sponsor),
                record.funding_whole().to_string(),
                escape_value(&record.description),
            ]
            .join(","),
        );
    }

    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_record;

    /// Minimal reader for the quoting rules above, newline-aware inside quotes.
    fn parse(text: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match (quoted, c) {
                (true, '"') if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                },
                (true, '"') => quoted = false,
                (true, c) => field.push(c),
                (false, '"') => quoted = true,
                (false, ',') => row.push(std::mem::take(&mut field)),
                (false, '\n') => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                },
                (false, c) => field.push(c),
            }
        }
        row.push(field);
        rows.push(row);
        rows
    }

    #[test]
    fn test_header_only_for_empty_set() {
        assert_eq!(
            to_csv(&[]),
            "Fiscal Year,Opportunity ID,Grant Program,Project Sponsor,Funding Amount,Project Description"
        );
    }

    #[test]
    fn test_row_format() {
        let record = test_record(
            "Metro \"MTA\" Transit",
            "Bus, Facilities",
            2024,
            1500.99,
            "Line one",
            "FTA-1",
        );
        let csv = to_csv(&[record]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[1],
            "2024,\"FTA-1\",\"Bus, Facilities\",\"Metro \"\"MTA\"\" Transit\",1500,\"Line one\""
        );
    }

    #[test]
    fn test_reparse_recovers_fields() {
        let records = vec![
            test_record("A \"quoted\" sponsor", "Low-No", 2023, 10.5, "multi\nline", "X-1"),
            test_record("Plain", "Rail, Vehicles", 2021, 999_999.0, "", "X-2"),
            test_record("Third", "Ferry", 2020, 0.0, "desc", "X-3"),
        ];

        let rows = parse(&to_csv(&records));
        assert_eq!(rows.len(), records.len() + 1);
        assert_eq!(rows[0], CSV_HEADERS.to_vec());

        for (row, record) in rows[1..].iter().zip(&records) {
            assert_eq!(
                row,
                &vec![
                    record.fiscal_year.to_string(),
                    record.opportunity_id.clone(),
                    record.program.clone(),
                    record.sponsor.clone(),
                    record.funding_whole().to_string(),
                    record.description.clone(),
                ]
            );
        }
    }
}
