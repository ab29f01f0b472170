use crate::models::{Column, Record, Species};
use anyhow::Result;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors recognized when (re)loading a dataset from disk.
///
/// A missing file is the recoverable case callers may want to detect and
/// report without aborting on an unexpected fault; everything else means the
/// file exists but does not round-trip to a valid dataset. No partial dataset
/// is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed dataset file {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl LoadError {
    /// True for the missing-input-file case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

/// Save records as CSV with header (four measurement columns + `species`).
pub fn save_csv<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        Column::SepalLength.header(),
        Column::SepalWidth.header(),
        Column::PetalLength.header(),
        Column::PetalWidth.header(),
        "species",
    ))?;
    for r in records {
        wtr.serialize((
            r.sepal_length,
            r.sepal_width,
            r.petal_length,
            r.petal_width,
            r.species.label(),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Load records from a CSV previously written by [`save_csv`].
///
/// The header must contain exactly the four measurement columns plus
/// `species`; every measurement must be a finite, non-negative number and
/// every label one of the three known species. Violations yield
/// [`LoadError::Malformed`] and no records.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    check_header(&mut rdr, path)?;
    parse_rows(rdr, path)
}

fn check_header<R: std::io::Read>(rdr: &mut csv::Reader<R>, path: &Path) -> Result<(), LoadError> {
    let headers = rdr
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let expected: Vec<&str> = Column::ALL
        .iter()
        .map(|c| c.header())
        .chain(std::iter::once("species"))
        .collect();
    let got: Vec<&str> = headers.iter().collect();
    if got != expected {
        return Err(LoadError::Malformed {
            path: path.to_path_buf(),
            reason: format!("unexpected columns {got:?}, expected {expected:?}"),
        });
    }
    Ok(())
}

fn parse_rows<R: std::io::Read>(
    mut rdr: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<Record>, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        path: path.to_path_buf(),
        reason,
    };

    let mut out = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = i + 2; // 1-based, after the header
        if row.len() != 5 {
            return Err(malformed(format!(
                "line {line}: expected 5 fields, got {}",
                row.len()
            )));
        }
        let mut values = [0.0f64; 4];
        for (j, v) in values.iter_mut().enumerate() {
            let field = &row[j];
            *v = field
                .parse::<f64>()
                .map_err(|_| malformed(format!("line {line}: invalid number {field:?}")))?;
            if !v.is_finite() || *v < 0.0 {
                return Err(malformed(format!(
                    "line {line}: measurement out of range: {field}"
                )));
            }
        }
        let species = row[4]
            .parse::<Species>()
            .map_err(|e| malformed(format!("line {line}: {e}")))?;
        out.push(Record {
            sepal_length: values[0],
            sepal_width: values[1],
            petal_length: values[2],
            petal_width: values[3],
            species,
        });
    }
    Ok(out)
}

/// Parse iris CSV content from an in-memory string (same format as
/// [`load_csv`], header included). Used for the embedded reference table.
pub(crate) fn parse_csv_str(content: &str, origin: &str) -> Result<Vec<Record>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let origin_path = Path::new(origin);
    check_header(&mut rdr, origin_path)?;
    parse_rows(rdr, origin_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Species;
    use tempfile::tempdir;

    fn sample() -> Vec<Record> {
        vec![
            Record {
                sepal_length: 5.1,
                sepal_width: 3.5,
                petal_length: 1.4,
                petal_width: 0.2,
                species: Species::Setosa,
            },
            Record {
                sepal_length: 6.3,
                sepal_width: 3.3,
                petal_length: 6.0,
                petal_width: 2.5,
                species: Species::Virginica,
            },
        ]
    }

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        save_csv(&sample(), &csvp).unwrap();
        save_json(&sample(), &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }

    #[test]
    fn csv_round_trip_preserves_rows() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("rt.csv");
        let records = sample();
        save_csv(&records, &p).unwrap();
        let back = load_csv(&p).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn missing_file_is_not_found() {
        let e = load_csv("definitely/not/here.csv").unwrap_err();
        assert!(e.is_not_found());
    }

    #[test]
    fn rejects_unknown_species_and_negative_values() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("bad.csv");

        let header =
            "sepal length (cm),sepal width (cm),petal length (cm),petal width (cm),species";
        std::fs::write(&p, format!("{header}\n5.1,3.5,1.4,0.2,sertosa\n")).unwrap();
        let e = load_csv(&p).unwrap_err();
        assert!(matches!(e, LoadError::Malformed { .. }), "{e}");

        std::fs::write(&p, format!("{header}\n-5.1,3.5,1.4,0.2,setosa\n")).unwrap();
        let e = load_csv(&p).unwrap_err();
        assert!(matches!(e, LoadError::Malformed { .. }), "{e}");
    }

    #[test]
    fn rejects_wrong_header() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("hdr.csv");
        std::fs::write(&p, "a,b,c,d,species\n1,2,3,4,setosa\n").unwrap();
        let e = load_csv(&p).unwrap_err();
        assert!(matches!(e, LoadError::Malformed { .. }), "{e}");
    }
}
