use iris_rs::dataset::{BuiltinIris, DataProvider};
use iris_rs::models::{Column, Record, Species};
use iris_rs::stats::{describe, grouped_means, missing_counts};

fn rec(sl: f64, sw: f64, pl: f64, pw: f64, species: Species) -> Record {
    Record {
        sepal_length: sl,
        sepal_width: sw,
        petal_length: pl,
        petal_width: pw,
        species,
    }
}

#[test]
fn describe_handles_small_hand_checked_fixture() {
    // Sepal lengths [1,2,3,4]: mean 2.5, median 2.5, q1 1.75, q3 3.25,
    // sample std sqrt(5/3).
    let rows: Vec<Record> = [1.0, 2.0, 3.0, 4.0]
        .into_iter()
        .map(|v| rec(v, 3.0, 1.0, 0.5, Species::Setosa))
        .collect();
    let summaries = describe(&rows);
    assert_eq!(summaries.len(), 4);

    let s = &summaries[0];
    assert_eq!(s.column, Column::SepalLength);
    assert_eq!(s.count, 4);
    assert_eq!(s.missing, 0);
    assert_eq!(s.min, 1.0);
    assert_eq!(s.max, 4.0);
    assert!((s.mean - 2.5).abs() < 1e-9);
    assert!((s.median - 2.5).abs() < 1e-9);
    assert!((s.q1 - 1.75).abs() < 1e-9);
    assert!((s.q3 - 3.25).abs() < 1e-9);
    assert!((s.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-9);
}

#[test]
fn builtin_dataset_counts_are_150_per_column() {
    let records = BuiltinIris.produce().unwrap();
    for s in describe(&records) {
        assert_eq!(s.count, 150, "column {:?}", s.column);
        assert_eq!(s.missing, 0, "column {:?}", s.column);
    }
}

#[test]
fn builtin_dataset_has_no_missing_values() {
    let records = BuiltinIris.produce().unwrap();
    let total: usize = missing_counts(&records).iter().map(|(_, n)| n).sum();
    assert_eq!(total, 0);
}

#[test]
fn grouped_means_come_back_in_alphabetical_order() {
    let records = BuiltinIris.produce().unwrap();
    let groups = grouped_means(&records);
    let order: Vec<Species> = groups.iter().map(|g| g.species).collect();
    assert_eq!(
        order,
        vec![Species::Setosa, Species::Versicolor, Species::Virginica]
    );
}

#[test]
fn virginica_has_largest_petal_means() {
    let records = BuiltinIris.produce().unwrap();
    let groups = grouped_means(&records);
    let by_species = |sp: Species| groups.iter().find(|g| g.species == sp).unwrap();

    let setosa = by_species(Species::Setosa);
    let versicolor = by_species(Species::Versicolor);
    let virginica = by_species(Species::Virginica);

    for column in [Column::PetalLength, Column::PetalWidth] {
        assert!(
            virginica.mean(column) > setosa.mean(column),
            "virginica vs setosa on {column:?}"
        );
        assert!(
            virginica.mean(column) > versicolor.mean(column),
            "virginica vs versicolor on {column:?}"
        );
    }

    // Setosa has the smallest mean for every numeric column.
    for column in Column::ALL {
        assert!(setosa.mean(column) < versicolor.mean(column));
        assert!(setosa.mean(column) < virginica.mean(column));
    }
}

#[test]
fn grouped_means_skip_absent_species() {
    let rows = vec![rec(5.0, 3.0, 1.5, 0.2, Species::Setosa)];
    let groups = grouped_means(&rows);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].species, Species::Setosa);
}
