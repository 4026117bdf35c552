//! CSV writer for award and correction records.
//!
//! Missing values are rendered as `N/A`. Both files always start with a
//! header row, even when no records were produced.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use dodaward_extractor::types::or_sentinel;
use dodaward_extractor::{AwardRecord, CorrectionRecord};
use serde::Serialize;

use crate::error::Result;

/// Award file columns.
pub const AWARD_HEADERS: [&str; 6] = ["Date", "FY", "Company", "Dollar Amount", "ProcurementID", "Link"];

/// Correction file columns.
pub const CORRECTION_HEADERS: [&str; 2] = ["Date", "Correction Paragraph"];

/// Award row for CSV serialization.
#[derive(Debug, Serialize)]
struct AwardRow<'a> {
    date: &'a str,
    fiscal_year: String,
    company: &'a str,
    amount: String,
    procurement_id: String,
    link: &'a str,
}

impl<'a> From<&'a AwardRecord> for AwardRow<'a> {
    fn from(r: &'a AwardRecord) -> Self {
        Self {
            date: &r.date,
            fiscal_year: or_sentinel(r.fiscal_year.as_ref()),
            company: &r.company,
            amount: or_sentinel(r.amount.as_ref()),
            procurement_id: or_sentinel(r.procurement_id.as_ref()),
            link: &r.source_ref,
        }
    }
}

/// Correction row for CSV serialization.
#[derive(Debug, Serialize)]
struct CorrectionRow<'a> {
    date: &'a str,
    paragraph: &'a str,
}

impl<'a> From<&'a CorrectionRecord> for CorrectionRow<'a> {
    fn from(r: &'a CorrectionRecord) -> Self {
        Self {
            date: &r.date,
            paragraph: &r.paragraph,
        }
    }
}

fn write_rows<W, T>(writer: W, headers: &[&str], rows: impl IntoIterator<Item = T>) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut out = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    out.write_record(headers)?;
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

/// Write award records in production order.
pub fn write_awards<W: Write>(writer: W, awards: &[AwardRecord]) -> Result<()> {
    write_rows(writer, &AWARD_HEADERS, awards.iter().map(AwardRow::from))
}

/// Write correction records in production order.
pub fn write_corrections<W: Write>(writer: W, corrections: &[CorrectionRecord]) -> Result<()> {
    write_rows(writer, &CORRECTION_HEADERS, corrections.iter().map(CorrectionRow::from))
}

/// Write award records to a file.
pub fn save_awards(path: &Path, awards: &[AwardRecord]) -> Result<()> {
    write_awards(File::create(path)?, awards)?;
    tracing::info!(path = %path.display(), rows = awards.len(), "Saved awards");
    Ok(())
}

/// Write correction records to a file.
pub fn save_corrections(path: &Path, corrections: &[CorrectionRecord]) -> Result<()> {
    write_corrections(File::create(path)?, corrections)?;
    tracing::info!(path = %path.display(), rows = corrections.len(), "Saved corrections");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LINK: &str = "http://www.defense.gov/News/Contracts/Contract/Article/3251958/";

    fn award(fiscal_year: Option<&str>, amount: Option<u64>, id: Option<&str>) -> AwardRecord {
        AwardRecord {
            date: "20221024".to_string(),
            fiscal_year: fiscal_year.map(str::to_string),
            company: "Acme Corp".to_string(),
            amount,
            procurement_id: id.map(str::to_string),
            source_ref: LINK.to_string(),
        }
    }

    fn render_awards(awards: &[AwardRecord]) -> String {
        let mut buf = Vec::new();
        write_awards(&mut buf, awards).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_awards() {
        let csv = render_awards(&[
            award(Some("22"), Some(5_000_000), Some("N00019-22-C-1234")),
            award(None, None, None),
        ]);

        assert_eq!(
            csv,
            format!(
                "Date,FY,Company,Dollar Amount,ProcurementID,Link\n\
                 20221024,22,Acme Corp,5000000,N00019-22-C-1234,{LINK}\n\
                 20221024,N/A,Acme Corp,N/A,N/A,{LINK}\n"
            )
        );
    }

    #[test]
    fn test_write_awards_empty_has_header() {
        assert_eq!(
            render_awards(&[]),
            "Date,FY,Company,Dollar Amount,ProcurementID,Link\n"
        );
    }

    #[test]
    fn test_write_corrections_quotes_commas() {
        let corrections = vec![CorrectionRecord {
            date: "20221024".to_string(),
            paragraph: "Correction: The contract for Acme Corp., Reston, Virginia, was misstated.".to_string(),
        }];
        let mut buf = Vec::new();
        write_corrections(&mut buf, &corrections).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Date,Correction Paragraph\n\
             20221024,\"Correction: The contract for Acme Corp., Reston, Virginia, was misstated.\"\n"
        );
    }

    #[test]
    fn test_save_awards_roundtrip_through_reader() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("webscraped_data.csv");
        save_awards(&path, &[award(Some("22"), Some(1), Some("N00019-22-C-1234"))]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), AWARD_HEADERS.to_vec());
        assert_eq!(reader.records().count(), 1);
    }
}
