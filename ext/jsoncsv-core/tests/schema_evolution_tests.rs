use jsoncsv_core::*;

use test_helpers::*;

// =============================================================================
// Header creation
// =============================================================================

#[test]
fn test_first_write_creates_header_in_first_seen_order() {
    let (_dir, path) = scratch_db();
    let store = Store::new(&path).unwrap();

    store
        .append_row(&data_row([("zeta", 1), ("alpha", 2), ("mid", 3)]))
        .unwrap();

    assert_eq!(read_lines(&path), vec!["zeta;alpha;mid", "1;2;3"]);
}

#[test]
fn test_header_grows_with_new_columns() {
    let (_dir, path) = scratch_db();
    let store = Store::new(&path).unwrap();

    store.append_row(&data_row([("a", 1), ("b", 2)])).unwrap();
    store.append_row(&data_row([("c", 3)])).unwrap();

    assert_eq!(read_lines(&path), vec!["a;b;c", "1;2", "0;0;3"]);

    let table = store.load_rows(RowRange::all()).unwrap();
    assert_eq!(
        table,
        expected_table(&[("a", &[1, 0]), ("b", &[2, 0]), ("c", &[0, 3])])
    );
}

// =============================================================================
// Preservation of existing rows
// =============================================================================

#[test]
fn test_existing_rows_survive_many_rewrites() {
    let (_dir, path) = scratch_db();
    let store = Store::new(&path).unwrap();

    let mut columns: Vec<String> = Vec::new();
    let mut written: Vec<String> = Vec::new();

    for i in 0..12i64 {
        let row = data_row([(format!("col_{}", i % 4), i), ("base".to_string(), -i)]);
        store.append_row(&row).unwrap();

        for column in row.keys() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        let cells: Vec<String> = columns
            .iter()
            .map(|c| row.get(c).copied().unwrap_or(0).to_string())
            .collect();
        written.push(cells.join(";"));

        let on_disk = read_lines(&path);
        assert_eq!(on_disk[0], columns.join(";"));
        assert_eq!(&on_disk[1..], &written[..]);
    }

    assert_eq!(columns, vec!["col_0", "base", "col_1", "col_2", "col_3"]);
}

#[test]
fn test_old_rows_read_placeholder_for_new_columns() {
    let (_dir, path) = scratch_db();
    let store = StoreBuilder::new(&path).with_placeholder(-1).build().unwrap();

    store.append_row(&data_row([("t", 20)])).unwrap();
    store.append_row(&data_row([("t", 21)])).unwrap();
    store.append_row(&data_row([("t", 22), ("h", 55)])).unwrap();

    let table = store.load_rows(RowRange::all()).unwrap();
    assert_eq!(table.column("t"), Some(&[20, 21, 22][..]));
    assert_eq!(table.column("h"), Some(&[-1, -1, 55][..]));
}

#[test]
fn test_rewrite_keeps_blank_and_foreign_lines() {
    let (_dir, path) = scratch_db();
    write_lines(&path, &["a", "1", "", "2;;", "3"]);
    let store = Store::new(&path).unwrap();

    store.append_row(&data_row([("b", 4)])).unwrap();

    assert_eq!(read_lines(&path), vec!["a;b", "1", "", "2;;", "3", "0;4"]);
}

#[test]
fn test_rewrite_keeps_line_endings_and_raw_bytes() {
    let (_dir, path) = scratch_db();
    std::fs::write(&path, b"a\r\n1\r\n\xff\xfe\n2\r\n").unwrap();
    let store = Store::new(&path).unwrap();

    store.append_row(&data_row([("b", 3)])).unwrap();

    assert_eq!(
        std::fs::read(&path).unwrap(),
        b"a;b\n1\r\n\xff\xfe\n2\r\n0;3\n"
    );
}

#[test]
fn test_append_after_unterminated_last_row() {
    let (_dir, path) = scratch_db();
    std::fs::write(&path, "a;b\n1;2").unwrap();
    let store = Store::new(&path).unwrap();

    store.append_row(&data_row([("a", 3)])).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a;b\n1;2\n3;0\n");

    let table = store.load_rows(RowRange::all()).unwrap();
    assert_eq!(table, expected_table(&[("a", &[1, 3]), ("b", &[2, 0])]));
}

#[test]
fn test_header_only_file_without_newline() {
    let (_dir, path) = scratch_db();
    std::fs::write(&path, "a;b").unwrap();
    let store = Store::new(&path).unwrap();

    store.append_row(&data_row([("b", 7)])).unwrap();
    assert_eq!(read_lines(&path), vec!["a;b", "0;7"]);
}

// =============================================================================
// Ordinal stability
// =============================================================================

#[test]
fn test_ordinals_never_move() {
    let (_dir, path) = scratch_db();
    let store = Store::new(&path).unwrap();

    let writes: Vec<Vec<&str>> = vec![
        vec!["x", "y"],
        vec!["y", "z"],
        vec!["w"],
        vec!["z", "x", "v"],
        vec!["u", "y"],
    ];

    let mut previous = Blueprint::new();
    for names in writes {
        let row = data_row(names.iter().map(|n| (*n, 1)));
        store.append_row(&row).unwrap();

        let current = store.schema().unwrap();
        for name in previous.ordered_names() {
            assert_eq!(current.ordinal(name), previous.ordinal(name), "{} moved", name);
        }
        previous = current;
    }

    assert_eq!(
        previous.ordered_names(),
        &["x", "y", "z", "w", "v", "u"]
    );
}

#[test]
fn test_reconcile_against_loaded_blueprint() {
    let (_dir, path) = scratch_db();
    write_lines(&path, &["a;b"]);

    let loaded = Blueprint::load_from_file(&path, ';').unwrap();
    let (merged, changed) = loaded.clone().reconcile(["b", "c"]);

    assert!(changed);
    assert_eq!(merged.ordinal("a"), loaded.ordinal("a"));
    assert_eq!(merged.ordinal("b"), loaded.ordinal("b"));
    assert_eq!(merged.ordinal("c"), Some(2));
    assert_eq!(merged.column_names(), vec!["a", "b", "c"]);
}

// =============================================================================
// Other delimiters
// =============================================================================

#[test]
fn test_custom_delimiter() {
    let (_dir, path) = scratch_db();
    let store = StoreBuilder::new(&path).with_delimiter(',').build().unwrap();

    store.append_row(&data_row([("a", 1), ("b", 2)])).unwrap();
    store.append_row(&data_row([("c", 3), ("a", 4)])).unwrap();

    assert_eq!(read_lines(&path), vec!["a,b,c", "1,2", "4,0,3"]);
    assert_eq!(
        store.load_rows(RowRange::all()).unwrap().to_json().unwrap(),
        r#"{"a":[1,4],"b":[2,0],"c":[0,3]}"#
    );
}

#[test]
fn test_multibyte_delimiter_char() {
    let (_dir, path) = scratch_db();
    let store = StoreBuilder::new(&path).with_delimiter('¦').build().unwrap();

    store.append_row(&data_row([("a", 1), ("b", -2)])).unwrap();
    assert_eq!(read_lines(&path), vec!["a¦b", "1¦-2"]);

    let table = store.load_rows(RowRange::all()).unwrap();
    assert_eq!(table.column("b"), Some(&[-2][..]));
}
