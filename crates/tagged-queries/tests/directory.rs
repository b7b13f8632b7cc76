//! Behavioural tests for parsing every query file in a directory.
#![expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]

use std::fs;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tagged_queries::{ParseError, Parser, ParserConfig, Syntax, parse_directory};
use tempfile::TempDir;

/// Temporary directory with a UTF-8 path.
struct QueryDir {
    _temp: TempDir,
    path: Utf8PathBuf,
}

impl QueryDir {
    fn write(&self, name: &str, content: &str) {
        fs::write(self.path.join(name), content).expect("failed to write query file");
    }

    fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn new() -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .expect("temp dir path should be valid UTF-8");
        Self { _temp: temp, path }
    }
}

#[fixture]
fn query_dir() -> QueryDir {
    QueryDir::new()
}

#[rstest]
fn merges_files_into_one_mapping(query_dir: QueryDir) {
    query_dir.write("users.sql", "@find-user\nselect * from users\nwhere id = $1\n");
    query_dir.write("orders.sql", "-- orders\n@list-orders\nselect * from orders\n");

    let queries = parse_directory(query_dir.path()).expect("directory parses");
    assert_eq!(queries.len(), 2);
    assert_eq!(
        queries.get("find-user"),
        Some("select * from users where id = $1")
    );
    assert_eq!(queries.get("list-orders"), Some("select * from orders"));
}

#[rstest]
fn later_files_overwrite_earlier_tags(query_dir: QueryDir) {
    // Written out of order to make sure the listing is sorted, not
    // creation-ordered.
    query_dir.write("b.sql", "@x\n2\n");
    query_dir.write("a.sql", "@x\n1\n");

    let queries = parse_directory(query_dir.path()).expect("directory parses");
    assert_eq!(queries.get("x"), Some("2"));
}

#[rstest]
fn tag_state_does_not_leak_between_files(query_dir: QueryDir) {
    query_dir.write("a.sql", "@x\nselect 1\n");
    query_dir.write("b.sql", "from continuation\n");

    let err = parse_directory(query_dir.path()).expect_err("b.sql has no tag");
    assert!(matches!(err, ParseError::TagMissing { line: 1 }));
}

#[rstest]
fn trailing_tag_does_not_block_next_file(query_dir: QueryDir) {
    // A file may not end with a dangling tag affecting the next one: the
    // adjacency rule is per source.
    query_dir.write("a.sql", "@x\nselect 1\n@dangling\n");
    query_dir.write("b.sql", "@y\nselect 2\n");

    let queries = parse_directory(query_dir.path()).expect("directory parses");
    assert_eq!(queries.get("x"), Some("select 1"));
    assert_eq!(queries.get("y"), Some("select 2"));
    assert!(!queries.contains("dangling"));
}

#[rstest]
fn subdirectories_are_skipped(query_dir: QueryDir) {
    query_dir.write("top.sql", "@top\nselect 1\n");
    let nested = query_dir.path().join("nested");
    fs::create_dir(&nested).expect("failed to create nested dir");
    fs::write(nested.join("inner.sql"), "@inner\nselect 2\n").expect("failed to write file");

    let queries = parse_directory(query_dir.path()).expect("directory parses");
    assert_eq!(queries.len(), 1);
    assert!(queries.contains("top"));
}

#[rstest]
fn first_structural_error_aborts(query_dir: QueryDir) {
    query_dir.write("a.sql", "@a\n@b\n");
    query_dir.write("b.sql", "orphan\n");

    let err = parse_directory(query_dir.path()).expect_err("a.sql is malformed");
    assert!(matches!(err, ParseError::TagOverwritten { line: 2, .. }));
}

#[rstest]
fn unreadable_file_content_is_an_io_error(query_dir: QueryDir) {
    fs::write(query_dir.path().join("bad.sql"), b"@a\n\xff\xfe\n").expect("failed to write file");

    let err = parse_directory(query_dir.path()).expect_err("invalid UTF-8");
    let ParseError::Io(io_err) = err else {
        panic!("expected an I/O error");
    };
    assert_eq!(io_err.kind(), ErrorKind::InvalidData);
}

#[rstest]
fn missing_directory_is_an_io_error(query_dir: QueryDir) {
    let missing = query_dir.path().join("does-not-exist");

    let err = parse_directory(&missing).expect_err("directory is missing");
    let ParseError::Io(io_err) = err else {
        panic!("expected an I/O error");
    };
    assert_eq!(io_err.kind(), ErrorKind::NotFound);
}

#[cfg(unix)]
#[rstest]
fn symlinked_files_outside_the_directory_are_read(query_dir: QueryDir) {
    let shared = QueryDir::new();
    shared.write("shared.sql", "@shared\nselect 1\n");
    std::os::unix::fs::symlink(
        shared.path().join("shared.sql"),
        query_dir.path().join("a.sql"),
    )
    .expect("failed to create symlink");

    let queries = parse_directory(query_dir.path()).expect("directory parses");
    assert_eq!(queries.len(), 1);
    assert_eq!(queries.get("shared"), Some("select 1"));
}

#[cfg(target_os = "linux")]
#[rstest]
fn entries_with_non_utf8_names_are_skipped(query_dir: QueryDir) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    query_dir.write("a.sql", "@a\nselect 1\n");
    let odd_name = query_dir
        .path()
        .as_std_path()
        .join(OsStr::from_bytes(b"b\xff.sql"));
    fs::write(odd_name, "@b\nselect 2\n").expect("failed to write file");

    let queries = parse_directory(query_dir.path()).expect("directory parses");
    assert_eq!(queries.len(), 1);
    assert_eq!(queries.get("a"), Some("select 1"));
}

#[rstest]
fn empty_directory_yields_empty_mapping(query_dir: QueryDir) {
    let queries = parse_directory(query_dir.path()).expect("directory parses");
    assert!(queries.is_empty());
}

#[rstest]
fn configured_parser_reads_directory(query_dir: QueryDir) {
    query_dir.write("q.sql", "# hash comment\n:ping\nselect 1\n");
    let syntax = Syntax::new("#", ":", "").expect("valid markers");
    let config = ParserConfig::default().apply_overrides(None, Some(syntax));
    tagged_queries::logging::init_logging(&config);

    let parser: Parser = config.parser();
    let queries = parser
        .parse_directory(query_dir.path())
        .expect("directory parses");
    assert_eq!(queries.get("ping"), Some("select 1"));
}
