//! Readers for the two input formats.
//!
//! The text format is a record count followed by that many records, each
//! five whitespace-separated tokens: `time tag team robot operand`. Line
//! breaks carry no meaning. Text is read lazily, one line at a time, so a
//! record can be acted on before the rest of the input has arrived.

use std::collections::VecDeque;
use std::io::BufRead;

use failure::Error;
use robowar_engine::Record;

/// Things that can go wrong while reading records.
#[derive(Debug, Fail, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not start with a record count.
    #[fail(display = "Expected a record count, found {:?}.", token)]
    BadCount { token: String },

    /// A numeric field of a record is not an unsigned 32-bit number.
    #[fail(display = "Record {}: {:?} is not an unsigned number.", index, token)]
    BadNumber { index: usize, token: String },

    /// The input itself could not be read.
    #[fail(display = "Could not read input: {}", reason)]
    Unreadable { reason: String },
}

/// Whitespace-separated tokens, pulled from the reader a line at a time.
struct Tokens<R> {
    reader: R,
    line: String,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Tokens<R> {
        Tokens {
            reader: reader,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    /// The next token, or None once the input is exhausted.
    fn next_token(&mut self) -> Result<Option<String>, ParseError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            self.line.clear();
            let read = self.reader.read_line(&mut self.line)
                .map_err(|e| ParseError::Unreadable { reason: e.to_string() })?;
            if read == 0 {
                return Ok(None);
            }
            self.pending.extend(self.line.split_whitespace().map(String::from));
        }
    }
}

/// Reads text records one at a time.
///
/// Yields an error for each record with a bad numeric field and carries on
/// with the next one. Stops after the announced number of records, or when
/// the input runs out. A read failure is yielded once and ends the records.
pub struct TextRecords<R> {
    tokens: Tokens<R>,
    remaining: usize,
    index: usize,
}

impl<R: BufRead> TextRecords<R> {
    /// Reads the record count. Empty input holds zero records.
    pub fn new(reader: R) -> Result<TextRecords<R>, ParseError> {
        let mut tokens = Tokens::new(reader);
        let remaining = match tokens.next_token()? {
            Some(token) => token.parse::<usize>()
                .map_err(|_| ParseError::BadCount { token: token.clone() })?,
            None => 0,
        };
        Ok(TextRecords {
            tokens: tokens,
            remaining: remaining,
            index: 0,
        })
    }

    /// The number of records announced but not read yet.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn number(&self, token: &str) -> Result<u32, ParseError> {
        token.parse::<u32>().map_err(|_| ParseError::BadNumber {
            index: self.index,
            token: token.to_string(),
        })
    }

    fn decode(&self, fields: &[String; 5]) -> Result<Record, ParseError> {
        let [time, letter, team_id, robot_id, operand] = fields;
        Ok(Record::from_raw(self.number(time)?, letter, [
            self.number(team_id)?,
            self.number(robot_id)?,
            self.number(operand)?,
        ]))
    }

    /// Collects the five tokens of the next record. None if the input ends
    /// first.
    fn fields(&mut self) -> Result<Option<[String; 5]>, ParseError> {
        let mut fields: [String; 5] = Default::default();
        for field in fields.iter_mut() {
            match self.tokens.next_token()? {
                Some(token) => *field = token,
                None => return Ok(None),
            }
        }
        Ok(Some(fields))
    }
}

impl<R: BufRead> Iterator for TextRecords<R> {
    type Item = Result<Record, ParseError>;

    fn next(&mut self) -> Option<Result<Record, ParseError>> {
        if self.remaining == 0 {
            return None;
        }
        let fields = match self.fields() {
            Ok(Some(fields)) => fields,
            Ok(None) => return None,
            Err(e) => {
                self.remaining = 0;
                return Some(Err(e));
            },
        };
        self.remaining -= 1;
        let record = self.decode(&fields);
        self.index += 1;
        Some(record)
    }
}

/// Reads a JSON array of records. The whole array has to be present before
/// any record is returned.
pub fn json_records(input: &str) -> Result<Vec<Record>, Error> {
    Ok(serde_json::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read};
    use robowar_engine::{Command, RobotKind};

    fn text_records(input: &str) -> TextRecords<&[u8]> {
        TextRecords::new(input.as_bytes()).unwrap()
    }

    #[test]
    fn reads_announced_records() {
        let input = "3\n0 A 1 1 0\n50 H 1 1 150\n80 U 1 1 2\n";
        let records: Vec<Record> = text_records(input)
            .map(|record| record.unwrap())
            .collect();
        assert_eq!(records, vec![
            Record::new(0, Command::Add { team_id: 1, robot_id: 1, kind: RobotKind::Infantry }),
            Record::new(50, Command::Heat { team_id: 1, robot_id: 1, amount: 150 }),
            Record::new(80, Command::Upgrade { team_id: 1, robot_id: 1, target_level: 2 }),
        ]);
    }

    #[test]
    fn line_breaks_do_not_matter() {
        let input = "2 0 A 1\n1 0\n7\nF 1 1 30";
        let records: Vec<Record> = text_records(input)
            .map(|record| record.unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], Record::new(7, Command::Damage { team_id: 1, robot_id: 1, amount: 30 }));
    }

    #[test]
    fn stops_at_the_count() {
        let input = "1\n0 A 1 1 0\n5 A 1 2 0\n";
        let mut records = text_records(input);
        assert_eq!(records.remaining(), 1);
        assert!(records.next().unwrap().is_ok());
        assert_eq!(records.remaining(), 0);
        assert!(records.next().is_none());
    }

    #[test]
    fn stops_when_input_runs_out() {
        let input = "4\n0 A 1 1 0\n5 A 1";
        let mut records = text_records(input);
        assert_eq!(records.by_ref().count(), 1);
        assert_eq!(records.remaining(), 3);
    }

    #[test]
    fn empty_input_has_no_records() {
        assert_eq!(text_records("  \n").count(), 0);
    }

    #[test]
    fn bad_numbers_skip_one_record() {
        let input = "3\n0 A 1 1 0\n5 F 1 x 10\n9 F 1 1 -4\n";
        let records: Vec<_> = text_records(input).collect();
        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert_eq!(records[1], Err(ParseError::BadNumber { index: 1, token: "x".to_string() }));
        assert_eq!(records[2], Err(ParseError::BadNumber { index: 2, token: "-4".to_string() }));
    }

    #[test]
    fn unknown_tags_still_parse() {
        let record = text_records("1\n12 R 0 0 0").next().unwrap().unwrap();
        assert_eq!(record, Record::new(12, Command::Nothing));
    }

    #[test]
    fn bad_count() {
        match TextRecords::new("many\n0 A 1 1 0".as_bytes()) {
            Err(e) => assert_eq!(e, ParseError::BadCount { token: "many".to_string() }),
            Ok(_) => panic!("expected a bad count"),
        }
    }

    #[test]
    fn reads_no_further_than_needed() {
        // Anything past the first record line fails to read, so the first
        // record has to come out of the first line alone.
        let reader = io::BufReader::new("2\n0 A 1 1 0\n".as_bytes().chain(Failing));
        let mut records = TextRecords::new(reader).unwrap();
        assert!(records.next().unwrap().is_ok());
        match records.next() {
            Some(Err(ParseError::Unreadable { .. })) => {},
            other => panic!("expected a read failure, got {:?}", other),
        }
        assert!(records.next().is_none());
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "stream broke"))
        }
    }

    #[test]
    fn json_input() {
        let input = r#"[
            {"time": 0, "command": {"Add": {"team_id": 1, "robot_id": 2, "kind": "Engineer"}}},
            {"time": 3, "command": {"Damage": {"team_id": 1, "robot_id": 2, "amount": 300}}}
        ]"#;
        let records = json_records(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].command, Command::Damage { team_id: 1, robot_id: 2, amount: 300 });
        assert!(json_records("[{\"time\": 1}]").is_err());
    }
}
