// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use super::*;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;

/// Discards every line; used by tests that only care about `on_line`.
struct NullSink;

impl OutputSink for NullSink {
    fn write_line(&self, _line: &str) {}
}

/// Records every line it's given, verbatim, for assertions.
#[derive(Default)]
struct RecordingSink(Mutex<Vec<String>>);

impl OutputSink for RecordingSink {
    fn write_line(&self, line: &str) {
        self.0.lock().unwrap().push(line.to_string());
    }
}

fn no_prefix() -> Arc<str> {
    Arc::from("")
}

#[tokio::test]
async fn spawn_line_reader_delivers_each_line() {
    let (mut writer, reader) = tokio::io::duplex(1024);
    let lines = Arc::new(Mutex::new(Vec::new()));
    let lines_clone = lines.clone();

    let handle = spawn_line_reader(
        "test",
        reader,
        no_prefix(),
        Arc::new(NullSink),
        move |line| lines_clone.lock().unwrap().push(line.to_string()),
        |_| {},
    );

    writer.write_all(b"hello\nworld\n").await.unwrap();
    writer.shutdown().await.unwrap();
    drop(writer);

    handle.await.unwrap();
    assert_eq!(*lines.lock().unwrap(), vec!["hello", "world"]);
}

#[tokio::test]
async fn spawn_line_reader_delivers_trailing_partial_line() {
    let (mut writer, reader) = tokio::io::duplex(1024);
    let lines = Arc::new(Mutex::new(Vec::new()));
    let lines_clone = lines.clone();

    let handle = spawn_line_reader(
        "test",
        reader,
        no_prefix(),
        Arc::new(NullSink),
        move |line| lines_clone.lock().unwrap().push(line.to_string()),
        |_| {},
    );

    writer.write_all(b"no newline at end").await.unwrap();
    drop(writer);

    handle.await.unwrap();
    assert_eq!(*lines.lock().unwrap(), vec!["no newline at end"]);
}

#[tokio::test]
async fn spawn_line_reader_handles_empty_input() {
    let (writer, reader) = tokio::io::duplex(1024);
    let lines = Arc::new(Mutex::new(Vec::new()));
    let lines_clone = lines.clone();

    let handle = spawn_line_reader(
        "test",
        reader,
        no_prefix(),
        Arc::new(NullSink),
        move |line| lines_clone.lock().unwrap().push(line.to_string()),
        |_| {},
    );

    drop(writer);
    handle.await.unwrap();
    assert!(lines.lock().unwrap().is_empty());
}

#[tokio::test]
async fn spawn_line_reader_prefixes_every_line_written_to_the_sink() {
    let (mut writer, reader) = tokio::io::duplex(1024);
    let sink = Arc::new(RecordingSink::default());

    let handle = spawn_line_reader(
        "test",
        reader,
        Arc::from("[svc] "),
        sink.clone(),
        |_| {},
        |_| {},
    );

    writer.write_all(b"hello\nworld\n").await.unwrap();
    drop(writer);

    handle.await.unwrap();
    assert_eq!(sink.0.lock().unwrap().as_slice(), ["[svc] hello", "[svc] world"]);
}

#[tokio::test]
async fn spawn_line_reader_reports_a_read_error_exactly_once() {
    // A reader whose first poll reports a real I/O error rather than EOF.
    struct BrokenReader;
    impl tokio::io::AsyncRead for BrokenReader {
        fn poll_read(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Err(std::io::Error::other("broken pipe")))
        }
    }

    let errors = Arc::new(Mutex::new(Vec::new()));
    let errors_clone = errors.clone();

    let handle = spawn_line_reader(
        "test",
        BrokenReader,
        no_prefix(),
        Arc::new(NullSink),
        |_| {},
        move |err| errors_clone.lock().unwrap().push(err.to_string()),
    );

    handle.await.unwrap();
    assert_eq!(errors.lock().unwrap().len(), 1);
}

mod line_splitting {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Splitting arbitrary text on '\n' and feeding it through the reader
        // must reproduce the same number of segments the text would split
        // into, modulo the trailing-empty-segment that `str::split` leaves
        // after a final newline (the reader simply never emits it).
        #[test]
        fn reassembled_lines_match_input_segments(
            segments in proptest::collection::vec("[a-zA-Z0-9 ]{0,12}", 0..8)
        ) {
            let text = segments.join("\n");
            let expected: Vec<String> = if text.is_empty() {
                Vec::new()
            } else {
                text.split('\n').map(str::to_string).collect()
            };

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let actual = rt.block_on(async move {
                let (mut writer, reader) = tokio::io::duplex(8192);
                let lines = Arc::new(Mutex::new(Vec::new()));
                let lines_clone = lines.clone();
                let handle = spawn_line_reader(
                    "prop",
                    reader,
                    no_prefix(),
                    Arc::new(NullSink),
                    move |line| lines_clone.lock().unwrap().push(line.to_string()),
                    |_| {},
                );
                writer.write_all(text.as_bytes()).await.unwrap();
                drop(writer);
                handle.await.unwrap();
                Arc::try_unwrap(lines).unwrap().into_inner().unwrap()
            });

            prop_assert_eq!(actual, expected);
        }
    }
}
