//! Console listing output

use crate::output::traits::{OutputHandler, OutputResult};
use std::collections::BTreeSet;
use std::io::{self, Stdout, Write};

/// Prints the endpoint list under a heading, followed by a total
pub struct ConsoleOutput<W: Write> {
    writer: W,
}

impl ConsoleOutput<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputHandler for ConsoleOutput<W> {
    fn write_endpoints(&mut self, endpoints: &BTreeSet<String>) -> OutputResult<()> {
        writeln!(self.writer, "\nDiscovered Endpoints:")?;
        for endpoint in endpoints {
            writeln!(self.writer, "{}", endpoint)?;
        }
        writeln!(self.writer, "\nTotal: {} endpoints", endpoints.len())?;
        self.writer.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        "console".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_format() {
        let endpoints: BTreeSet<String> = ["/login", "/api", "/api/users"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut output = ConsoleOutput::new(Vec::new());

        output.write_endpoints(&endpoints).unwrap();

        let text = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(
            text,
            "\nDiscovered Endpoints:\n/api\n/api/users\n/login\n\nTotal: 3 endpoints\n"
        );
    }

    #[test]
    fn test_empty_listing() {
        let mut output = ConsoleOutput::new(Vec::new());
        output.write_endpoints(&BTreeSet::new()).unwrap();

        let text = String::from_utf8(output.into_inner()).unwrap();
        assert!(text.ends_with("Total: 0 endpoints\n"));
    }
}
