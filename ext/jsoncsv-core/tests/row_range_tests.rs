use jsoncsv_core::*;

use test_helpers::*;

fn load(range: RowRange) -> Table {
    let (_dir, path) = scratch_db();
    three_row_db(&path);
    Store::new(&path).unwrap().load_rows(range).unwrap()
}

#[test]
fn test_default_range_reads_everything() {
    let table = load(RowRange::all());
    assert_eq!(
        table.to_json().unwrap(),
        r#"{"a":[1,2,3],"b":[10,20,30],"c":[100,200,300]}"#
    );
}

#[test]
fn test_first_row_with_open_end_skips_leading_rows() {
    let table = load(RowRange::new(1, 0));
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column("a"), Some(&[2, 3][..]));
    assert_eq!(table.column("c"), Some(&[200, 300][..]));
}

#[test]
fn test_inclusive_bounds() {
    let table = load(RowRange::new(1, 1));
    assert_eq!(table.column("b"), Some(&[20][..]));

    let table = load(RowRange::new(0, 1));
    assert_eq!(table.column("a"), Some(&[1, 2][..]));

    let table = load(RowRange::new(2, 2));
    assert_eq!(table.column("a"), Some(&[3][..]));
}

#[test]
fn test_zero_last_row_is_unbounded() {
    assert_eq!(load(RowRange::new(0, 0)).row_count(), 3);
    assert_eq!(load(RowRange::new(2, 0)).row_count(), 1);
}

#[test]
fn test_explicit_bound_selects_only_first_row() {
    let table = load(RowRange::bounded(0, 0));
    assert_eq!(table.column("a"), Some(&[1][..]));
}

#[test]
fn test_range_past_end() {
    let table = load(RowRange::new(5, 0));
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.to_json().unwrap(), r#"{"a":[],"b":[],"c":[]}"#);

    let table = load(RowRange::new(1, 50));
    assert_eq!(table.column("a"), Some(&[2, 3][..]));
}

#[test]
fn test_inverted_range_is_empty() {
    let table = load(RowRange::bounded(2, 1));
    assert!(table.is_empty());
}

#[test]
fn test_rows_after_window_are_not_parsed() {
    let (_dir, path) = scratch_db();
    write_lines(&path, &["a", "1", "2", "not a number"]);
    let store = Store::new(&path).unwrap();

    let table = store.load_rows(RowRange::new(0, 1)).unwrap();
    assert_eq!(table.column("a"), Some(&[1, 2][..]));

    assert!(store.load_rows(RowRange::all()).is_err());
}

#[test]
fn test_rows_before_window_are_not_parsed() {
    let (_dir, path) = scratch_db();
    write_lines(&path, &["a", "oops", "2"]);
    let store = Store::new(&path).unwrap();

    let table = store.load_rows(RowRange::starting_at(1)).unwrap();
    assert_eq!(table.column("a"), Some(&[2][..]));
}
