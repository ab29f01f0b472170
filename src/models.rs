use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three iris species labels.
///
/// Derived `Ord` follows declaration order, which is also alphabetical —
/// grouped output everywhere in this crate uses this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    /// All species, in alphabetical (= grouping) order.
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    /// Lowercase label as stored in the `species` CSV column.
    pub fn label(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "setosa" => Ok(Species::Setosa),
            "versicolor" => Ok(Species::Versicolor),
            "virginica" => Ok(Species::Virginica),
            other => Err(format!("unknown species label: {other:?}")),
        }
    }
}

/// One flower measurement: four numeric attributes (centimeters) plus the
/// species label. Records are immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: Species,
}

/// The four numeric measurement columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Column {
    /// All numeric columns, in table order.
    pub const ALL: [Column; 4] = [
        Column::SepalLength,
        Column::SepalWidth,
        Column::PetalLength,
        Column::PetalWidth,
    ];

    /// CSV header / axis label for this column.
    pub fn header(self) -> &'static str {
        match self {
            Column::SepalLength => "sepal length (cm)",
            Column::SepalWidth => "sepal width (cm)",
            Column::PetalLength => "petal length (cm)",
            Column::PetalWidth => "petal width (cm)",
        }
    }

    /// Short identifier used in chart file names.
    pub fn slug(self) -> &'static str {
        match self {
            Column::SepalLength => "sepal_length",
            Column::SepalWidth => "sepal_width",
            Column::PetalLength => "petal_length",
            Column::PetalWidth => "petal_width",
        }
    }

    /// Read this column's value out of a record.
    pub fn value(self, r: &Record) -> f64 {
        match self {
            Column::SepalLength => r.sepal_length,
            Column::SepalWidth => r.sepal_width,
            Column::PetalLength => r.petal_length,
            Column::PetalWidth => r.petal_width,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_labels_round_trip() {
        for s in Species::ALL {
            assert_eq!(s.label().parse::<Species>().unwrap(), s);
        }
        assert!("sertosa".parse::<Species>().is_err());
    }

    #[test]
    fn species_order_is_alphabetical() {
        assert!(Species::Setosa < Species::Versicolor);
        assert!(Species::Versicolor < Species::Virginica);
    }

    #[test]
    fn column_value_accessor() {
        let r = Record {
            sepal_length: 5.1,
            sepal_width: 3.5,
            petal_length: 1.4,
            petal_width: 0.2,
            species: Species::Setosa,
        };
        assert_eq!(Column::SepalLength.value(&r), 5.1);
        assert_eq!(Column::PetalWidth.value(&r), 0.2);
    }
}
