use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::summary::SummarySet;

/// Column order of an exported summary.
const HEADER: [&str; 6] = ["table", "title", "x_field", "y_field", "x", "y"];

/// Write every table of `summary` as long-format CSV, one line per point.
pub fn write_summary_csv(path: &Path, summary: &SummarySet) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_summary(file, summary)
}

pub fn write_summary<W: Write>(out: W, summary: &SummarySet) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;

    for table in &summary.tables {
        for (x, y) in &table.points {
            let (x, y) = (x.to_string(), y.to_string());
            wtr.write_record([
                table.name,
                table.title.as_str(),
                table.x_field,
                table.y_field,
                x.as_str(),
                y.as_str(),
            ])?;
        }
    }

    wtr.flush().context("flushing summary CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::yearly_summary;
    use crate::data::model::{Month, SalesDataset, SalesRecord};

    fn dataset() -> SalesDataset {
        SalesDataset::from_records(vec![
            SalesRecord {
                year: 1995,
                month: Month::Mar,
                recession: false,
                vehicle_type: "Sports".into(),
                automobile_sales: 40.0,
                advertising_expenditure: 120.0,
            },
            SalesRecord {
                year: 1995,
                month: Month::Jan,
                recession: false,
                vehicle_type: "Sports".into(),
                automobile_sales: 20.0,
                advertising_expenditure: 80.0,
            },
        ])
    }

    #[test]
    fn exports_one_line_per_point_in_table_order() {
        let summary = yearly_summary(&dataset(), 1995);
        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "table,title,x_field,y_field,x,y");
        assert_eq!(
            lines[1],
            "Sales for Year,Automobile Sales for the Year 1995,Year,Automobile_Sales,1995,30"
        );
        assert_eq!(
            lines[2],
            "Monthly Sales,Total Monthly Automobile Sales,Month,Automobile_Sales,Jan,20"
        );
        assert_eq!(
            lines[3],
            "Monthly Sales,Total Monthly Automobile Sales,Month,Automobile_Sales,Mar,40"
        );
        // 1 year point + 2 months + 1 vehicle type + 1 expenditure point
        assert_eq!(lines.len(), 1 + 5);
    }

    #[test]
    fn writes_to_a_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&path, &yearly_summary(&dataset(), 1995)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Advertising Expenditure by Type"));
    }

    #[test]
    fn empty_summary_writes_only_the_header() {
        let summary = yearly_summary(&SalesDataset::default(), 1980);
        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().trim_end(), "table,title,x_field,y_field,x,y");
    }
}
