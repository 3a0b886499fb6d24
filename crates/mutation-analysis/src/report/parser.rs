//! Reader for PIT's `mutations.xml`.

use std::path::Path;

use mutation_core::errors::ReportError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::model::{Mutant, MutantBuilder, OperatorCatalog};
use crate::xml;

/// Parses PIT XML reports into [`Mutant`]s.
///
/// ```xml
/// <mutations>
///   <mutation detected="true" status="KILLED" numberOfTestsRun="3">
///     <sourceFile>Foo.java</sourceFile>
///     <mutatedClass>com.example.Foo</mutatedClass>
///     <mutatedMethod>bar</mutatedMethod>
///     <methodDescription>()V</methodDescription>
///     <lineNumber>12</lineNumber>
///     <mutator>org.pitest.mutationtest.engine.gregor.mutators.NegateConditionalsMutator</mutator>
///     <index>5</index>
///     <killingTest>com.example.FooTest.testBar(com.example.FooTest)</killingTest>
///     <description>negated conditional</description>
///   </mutation>
/// </mutations>
/// ```
///
/// Elements other than the ones above are skipped. The reader never resolves
/// external entities.
#[derive(Debug, Clone, Copy)]
pub struct PitestReportParser<'a> {
    catalog: &'a OperatorCatalog,
}

impl<'a> PitestReportParser<'a> {
    pub fn new(catalog: &'a OperatorCatalog) -> Self {
        Self { catalog }
    }

    /// Parse the report at `path`.
    ///
    /// A missing file yields no mutants. A malformed report is logged and
    /// yields no mutants; only I/O failures are errors.
    pub fn parse_mutants(&self, path: &Path) -> Result<Vec<Mutant>, ReportError> {
        if !path.exists() {
            tracing::debug!(report = %path.display(), "no report found");
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        match self.read_mutants(&path.display().to_string(), &content) {
            Ok(mutants) => Ok(mutants),
            Err(e) => {
                tracing::warn!(report = %path.display(), error = %e, "parsing report failed");
                Ok(Vec::new())
            }
        }
    }

    /// Parse a report held in memory. Any malformed mutation fails the read.
    pub fn read_mutants(&self, source_name: &str, content: &str) -> Result<Vec<Mutant>, ReportError> {
        let malformed = |message: String| ReportError::Xml {
            path: source_name.to_string(),
            message,
        };

        let mut reader = xml::reader(content);
        let mut mutants = Vec::new();
        loop {
            let event = reader
                .read_event()
                .map_err(|e| malformed(xml::position_message(&reader, &e)))?;
            match event {
                Event::Start(e) if e.name().as_ref() == b"mutation" => {
                    let mutant = self.read_mutant(&mut reader, &e, &malformed)?;
                    tracing::debug!(
                        class = mutant.mutated_class(),
                        line = mutant.line_number(),
                        state = %mutant.state(),
                        operator = mutant.operator().id(),
                        "found mutant"
                    );
                    mutants.push(mutant);
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(mutants)
    }

    fn read_mutant(
        &self,
        reader: &mut Reader<&[u8]>,
        start: &BytesStart<'_>,
        malformed: &dyn Fn(String) -> ReportError,
    ) -> Result<Mutant, ReportError> {
        let attribute = |name: &str| xml::attribute(start, name).map_err(malformed);

        let mut builder = Mutant::builder().status(&attribute("status")?.unwrap_or_default());
        if let Some(detected) = attribute("detected")? {
            builder = builder.detected(parse_bool("detected", &detected)?);
        }
        if let Some(tests_run) = attribute("numberOfTestsRun")? {
            builder = builder.number_of_tests_run(parse_number("numberOfTestsRun", &tests_run)?);
        }

        loop {
            let event = reader
                .read_event()
                .map_err(|e| malformed(xml::position_message(reader, &e)))?;
            match event {
                Event::Start(e) => {
                    let name = e.name();
                    builder = match name.as_ref() {
                        field @ (b"sourceFile"
                        | b"mutatedClass"
                        | b"mutatedMethod"
                        | b"methodDescription"
                        | b"lineNumber"
                        | b"mutator"
                        | b"index"
                        | b"killingTest"
                        | b"description") => {
                            let text = xml::read_text(reader, field).map_err(malformed)?;
                            self.apply(builder, field, &text)?
                        }
                        // PIT 1.4+ nests <index> in <indexes>
                        b"indexes" => builder,
                        _ => {
                            reader
                                .read_to_end(name)
                                .map_err(|e| malformed(xml::position_message(reader, &e)))?;
                            builder
                        }
                    };
                }
                Event::End(e) if e.name().as_ref() == b"mutation" => break,
                Event::Eof => {
                    return Err(malformed("unexpected end of document inside <mutation>".to_string()))
                }
                _ => {}
            }
        }
        builder.build()
    }

    fn apply(
        &self,
        builder: MutantBuilder,
        field: &[u8],
        text: &str,
    ) -> Result<MutantBuilder, ReportError> {
        Ok(match field {
            b"sourceFile" => builder.source_file(text),
            b"mutatedClass" => builder.mutated_class(text),
            b"mutatedMethod" => builder.mutated_method(text),
            b"methodDescription" => builder.method_description(text),
            b"lineNumber" => builder.line_number(parse_number("lineNumber", text)?),
            b"mutator" => builder.using_mutator(self.catalog, text),
            b"index" => builder.index(parse_number("index", text)?),
            b"killingTest" => builder.killing_test(text),
            b"description" => builder.description(text),
            _ => builder,
        })
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<u32, ReportError> {
    value.trim().parse().map_err(|_| ReportError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ReportError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ReportError::InvalidValue {
            field,
            value: other.to_string(),
        }),
    }
}
