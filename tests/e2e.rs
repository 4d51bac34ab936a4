use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

use serde_json;
use structopt::StructOpt;

use openmetrics_text::cliopt::CliOpt;
use openmetrics_text::input::{JsonDecoder, LineReader};
use openmetrics_text::output::{LineWriter, OpenMetricsEncoder, Writer};
use openmetrics_text::runner::Runner;

#[test]
fn e2e() -> Result<(), Box<dyn std::error::Error>> {
    let root_test_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("scenarios");

    for test_dir in fs::read_dir(&root_test_dir)? {
        let test_dir = test_dir?.path();

        if let Ok(filter) = std::env::var("E2E_CASE") {
            if !test_dir.as_os_str().to_string_lossy().ends_with(&filter) {
                continue;
            }
        }

        let cli_args: Vec<String> =
            serde_json::from_str(&fs::read_to_string(test_dir.join("args.json"))?)?;

        let actual_output = render(
            Box::new(io::BufReader::new(fs::File::open(test_dir.join("input"))?)),
            &cli_args,
        )?;

        let expected_output = fs::read(test_dir.join("output"))?;

        assert_eq!(
            expected_output,
            actual_output,
            "\nUnexpected exposition in '{}'.\nExpected:\n{}\nActual:\n{}",
            test_dir.display(),
            String::from_utf8_lossy(&expected_output),
            String::from_utf8_lossy(&actual_output),
        );
    }

    Ok(())
}

#[test]
fn e2e_invalid_definition_stops_the_run() {
    let input = "{\"name\": \"ok\", \"type\": \"gauge\", \"value\": 1}\n{\"name\": \"bad\", \"type\": \"counter\", \"value\": -1}\n";
    let args = vec!["omtext".to_string()];

    let err = render(Box::new(io::BufReader::new(input.as_bytes())), &args).unwrap_err();
    assert!(err.to_string().contains("Counters must start at 0"));
}

#[test]
fn e2e_duplicate_series_is_rejected() {
    let input = concat!(
        "{\"name\": \"a\", \"type\": \"counter\", \"value\": 1, \"labels\": [[\"x\", \"1\"]]}\n",
        "{\"name\": \"a\", \"type\": \"counter\", \"value\": 2, \"labels\": [[\"x\", \"1\"]]}\n",
    );
    let args = vec!["omtext".to_string(), "--eof".to_string()];

    let err = render(Box::new(io::BufReader::new(input.as_bytes())), &args).unwrap_err();
    assert!(err.to_string().contains("already has a metric with labels"));
}

#[test]
fn e2e_family_must_be_contiguous() {
    let input = concat!(
        "{\"name\": \"a\", \"type\": \"gauge\", \"value\": 1, \"labels\": [[\"x\", \"1\"]]}\n",
        "{\"name\": \"b\", \"type\": \"gauge\", \"value\": 1}\n",
        "{\"name\": \"a\", \"type\": \"gauge\", \"value\": 2, \"labels\": [[\"x\", \"2\"]]}\n",
    );
    let args = vec!["omtext".to_string()];

    let err = render(Box::new(io::BufReader::new(input.as_bytes())), &args).unwrap_err();
    assert!(err.to_string().contains("consecutive lines"));
}

#[test]
fn e2e_same_name_with_another_type_is_rejected() {
    let input = concat!(
        "{\"name\": \"a\", \"type\": \"gauge\", \"value\": 1}\n",
        "{\"name\": \"a\", \"type\": \"counter\", \"value\": 1, \"labels\": [[\"x\", \"1\"]]}\n",
    );
    let args = vec!["omtext".to_string()];

    assert!(render(Box::new(io::BufReader::new(input.as_bytes())), &args).is_err());
}

struct TestWriter<W>(Rc<RefCell<W>>);

impl<W: Writer> Writer for TestWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.borrow_mut().write(buf)
    }
}

fn render(
    input_reader: Box<dyn io::BufRead>,
    cli_args: &[String],
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let opt = CliOpt::from_iter(cli_args);

    let writer = Rc::new(RefCell::new(LineWriter::new(Vec::new())));

    let mut runner = Runner::new(
        Box::new(LineReader::new(input_reader)),
        Box::new(JsonDecoder::new(opt.timestamp)),
        Box::new(OpenMetricsEncoder::with_eof(opt.eof)),
        Box::new(TestWriter(Rc::clone(&writer))),
    );
    runner.run()?;

    // To make Rc::try_unwrap(writer) work.
    drop(runner);

    let writer = match Rc::try_unwrap(writer) {
        Ok(writer) => writer,
        _ => unreachable!(),
    };

    Ok(writer.into_inner().into_inner())
}
